//! Leveled diagnostics collected during a generation pass.
//!
//! Every entry is also forwarded to the `log` facade so hosts that only
//! install a logger still see composer diagnostics.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub label: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Report {
    entries: Vec<LogEntry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, level: LogLevel, label: &str, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error => log::error!("[{label}] {message}"),
            LogLevel::Warning => log::warn!("[{label}] {message}"),
            LogLevel::Info => log::info!("[{label}] {message}"),
        }
        self.entries.push(LogEntry {
            level,
            label: label.to_string(),
            message,
        });
    }

    pub fn log_error(&mut self, label: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, label, message);
    }

    pub fn log_warn(&mut self, label: &str, message: impl Into<String>) {
        self.log(LogLevel::Warning, label, message);
    }

    pub fn log_info(&mut self, label: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, label, message);
    }

    pub fn has_log_type(&self, level: LogLevel) -> bool {
        self.entries.iter().any(|e| e.level == level)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries of one level, in insertion order.
    pub fn entries_of(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }
}
