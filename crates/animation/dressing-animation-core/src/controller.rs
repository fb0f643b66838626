//! Animator controller model: parameters, layers, state machines, states
//! and transitions.
//!
//! States are stored by index inside their state machine and transitions
//! refer to their destination by [`StateId`]. Transition lists are ordered;
//! the runtime evaluates them first to last.

use serde::{Deserialize, Serialize};

use crate::clip::AnimationClip;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    Float,
    Int,
    Bool,
    Trigger,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorControllerParameter {
    pub name: String,
    pub parameter_type: ParameterType,
    pub default_float: f32,
    pub default_int: i32,
    pub default_bool: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionMode {
    If,
    IfNot,
    Greater,
    Less,
    Equals,
    NotEqual,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorCondition {
    pub mode: ConditionMode,
    pub parameter: String,
    pub threshold: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptionSource {
    None,
    Source,
    Destination,
    SourceThenDestination,
    DestinationThenSource,
}

/// Transition leaving a state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorStateTransition {
    pub destination: StateId,
    pub conditions: Vec<AnimatorCondition>,
    pub has_exit_time: bool,
    pub exit_time: f32,
    pub duration: f32,
    pub has_fixed_duration: bool,
    pub offset: f32,
    pub interruption_source: InterruptionSource,
    pub ordered_interruption: bool,
    pub can_transition_to_self: bool,
}

/// Transition leaving the implicit Entry node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorTransition {
    pub destination: StateId,
    pub conditions: Vec<AnimatorCondition>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverChangeType {
    Set,
    Add,
    Random,
    Copy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverParameter {
    pub change_type: DriverChangeType,
    pub name: String,
    pub value: f32,
}

/// Behaviours attached to states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StateBehaviour {
    /// Writes parameter values when the state is entered.
    ParameterDriver {
        local_only: bool,
        parameters: Vec<DriverParameter>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    pub name: String,
    pub position: [f32; 2],
    pub write_default_values: bool,
    pub motion: Option<AnimationClip>,
    pub speed: f32,
    pub speed_parameter: Option<String>,
    pub cycle_offset: f32,
    pub cycle_offset_parameter: Option<String>,
    pub mirror: bool,
    pub mirror_parameter: Option<String>,
    pub ik_on_feet: bool,
    /// When set, normalized time is driven by this float parameter.
    pub time_parameter: Option<String>,
    pub transitions: Vec<AnimatorStateTransition>,
    pub behaviours: Vec<StateBehaviour>,
}

impl AnimatorState {
    pub fn new(name: impl Into<String>, position: [f32; 2], write_default_values: bool) -> Self {
        Self {
            name: name.into(),
            position,
            write_default_values,
            motion: None,
            speed: 1.0,
            speed_parameter: None,
            cycle_offset: 0.0,
            cycle_offset_parameter: None,
            mirror: false,
            mirror_parameter: None,
            ik_on_feet: false,
            time_parameter: None,
            transitions: Vec::new(),
            behaviours: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildStateMachine {
    pub name: String,
    pub state_machine: AnimatorStateMachine,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatorStateMachine {
    pub states: Vec<AnimatorState>,
    pub default_state: Option<StateId>,
    pub entry_transitions: Vec<AnimatorTransition>,
    pub state_machines: Vec<ChildStateMachine>,
}

impl AnimatorStateMachine {
    pub fn state(&self, id: StateId) -> Option<&AnimatorState> {
        self.states.get(id.0)
    }

    pub fn state_mut(&mut self, id: StateId) -> Option<&mut AnimatorState> {
        self.states.get_mut(id.0)
    }

    pub fn find_state(&self, name: &str) -> Option<StateId> {
        self.states.iter().position(|s| s.name == name).map(StateId)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorControllerLayer {
    pub name: String,
    pub default_weight: f32,
    pub state_machine: AnimatorStateMachine,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatorController {
    pub name: String,
    pub parameters: Vec<AnimatorControllerParameter>,
    pub layers: Vec<AnimatorControllerLayer>,
}

impl AnimatorController {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&AnimatorControllerParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn layer(&self, name: &str) -> Option<&AnimatorControllerLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}
