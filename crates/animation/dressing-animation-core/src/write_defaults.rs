//! Write-defaults detection over an existing animator controller.

use serde::{Deserialize, Serialize};

use crate::controller::{AnimatorController, AnimatorStateMachine};

/// Outcome of write-defaults detection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteDefaultsMode {
    /// States disagree; the caller has to choose explicitly.
    DoNothing,
    On,
    Off,
}

impl WriteDefaultsMode {
    /// The determined flag, or `None` when undetermined.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            WriteDefaultsMode::DoNothing => None,
            WriteDefaultsMode::On => Some(true),
            WriteDefaultsMode::Off => Some(false),
        }
    }
}

/// Scan every state in every layer, descending into nested state machines.
/// A controller without states detects as `Off`.
pub fn detect_write_defaults_mode(controller: &AnimatorController) -> WriteDefaultsMode {
    let mut stack: Vec<&AnimatorStateMachine> =
        controller.layers.iter().map(|l| &l.state_machine).collect();

    let mut seen_on = false;
    let mut seen_off = false;

    while let Some(machine) = stack.pop() {
        for state in &machine.states {
            if state.write_default_values {
                seen_on = true;
            } else {
                seen_off = true;
            }
        }
        stack.extend(machine.state_machines.iter().map(|c| &c.state_machine));
    }

    match (seen_on, seen_off) {
        (true, true) => WriteDefaultsMode::DoNothing,
        (true, false) => WriteDefaultsMode::On,
        _ => WriteDefaultsMode::Off,
    }
}
