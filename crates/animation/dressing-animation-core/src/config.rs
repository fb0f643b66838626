//! Generation configuration and the per-pass animator options derived from it.

use dressing_api_core::ObjectId;
use serde::{Deserialize, Serialize};

use crate::controller::AnimatorController;
use crate::report::Report;
use crate::write_defaults::{detect_write_defaults_mode, WriteDefaultsMode};

const LOG_LABEL: &str = "AnimatorOptions";

/// How the write-defaults flag for generated states is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteDefaultsSetting {
    /// Detect from the existing controller.
    #[default]
    Auto,
    On,
    Off,
}

/// User-facing configuration for a generation pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub write_defaults: WriteDefaultsSetting,
    /// Used when detection finds both on and off states.
    pub mixed_write_defaults_fallback: bool,
}

impl Config {
    /// Resolve the options for one pass over `existing`. Undetermined
    /// detection falls back to [`Config::mixed_write_defaults_fallback`] and
    /// is always surfaced as a warning.
    pub fn resolve_options(
        &self,
        root: ObjectId,
        existing: Option<&AnimatorController>,
        report: &mut Report,
    ) -> AnimatorOptions {
        match self.write_defaults {
            WriteDefaultsSetting::On => {
                report.log_info(LOG_LABEL, "Explicitly specified to use write defaults on");
                AnimatorOptions::new(root).with_write_defaults(true)
            }
            WriteDefaultsSetting::Off => {
                report.log_info(LOG_LABEL, "Explicitly specified to use write defaults off");
                AnimatorOptions::new(root).with_write_defaults(false)
            }
            WriteDefaultsSetting::Auto => {
                let mode = existing
                    .map(detect_write_defaults_mode)
                    .unwrap_or(WriteDefaultsMode::Off);
                AnimatorOptions::from_detected(root, mode, self.mixed_write_defaults_fallback, report)
            }
        }
    }
}

/// Options shared by every builder during one composition pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimatorOptions {
    /// Object that curve paths are relative to.
    pub root: ObjectId,
    /// Baked into every state created during the pass.
    pub write_defaults: bool,
}

impl AnimatorOptions {
    pub fn new(root: ObjectId) -> Self {
        Self {
            root,
            write_defaults: false,
        }
    }

    pub fn with_write_defaults(mut self, write_defaults: bool) -> Self {
        self.write_defaults = write_defaults;
        self
    }

    pub fn with_root(mut self, root: ObjectId) -> Self {
        self.root = root;
        self
    }

    /// Build options from a detection result, using `fallback` when the
    /// result is [`WriteDefaultsMode::DoNothing`].
    pub fn from_detected(
        root: ObjectId,
        mode: WriteDefaultsMode,
        fallback: bool,
        report: &mut Report,
    ) -> Self {
        let write_defaults = match mode.as_bool() {
            Some(wd) => {
                report.log_info(
                    LOG_LABEL,
                    format!("Detected write defaults {}", if wd { "on" } else { "off" }),
                );
                wd
            }
            None => {
                report.log_warn(
                    LOG_LABEL,
                    format!(
                        "Existing states mix write defaults on and off, using {}",
                        if fallback { "on" } else { "off" }
                    ),
                );
                fallback
            }
        };
        Self::new(root).with_write_defaults(write_defaults)
    }
}
