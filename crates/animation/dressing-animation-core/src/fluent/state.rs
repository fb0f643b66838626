use crate::clip::AnimationClip;
use crate::controller::{
    AnimatorState, AnimatorStateTransition, InterruptionSource, StateBehaviour, StateId,
};

use super::animator::AnimatorParameter;
use super::transition::TransitionBuilder;

/// Builder over a single state. Setters consume and return the builder so
/// calls chain; `add_transition` ends the chain with a transition builder.
pub struct StateBuilder<'a> {
    state: &'a mut AnimatorState,
    id: StateId,
}

impl<'a> StateBuilder<'a> {
    pub(super) fn new(state: &'a mut AnimatorState, id: StateId) -> Self {
        Self { state, id }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn with_motion(self, clip: AnimationClip) -> Self {
        self.state.motion = Some(clip);
        self
    }

    /// Drive normalized time from `param` instead of playing the clip.
    pub fn with_motion_time(self, param: &AnimatorParameter) -> Self {
        self.state.time_parameter = Some(param.name.clone());
        self
    }

    pub fn without_motion_time(self) -> Self {
        self.state.time_parameter = None;
        self
    }

    pub fn with_speed(self, speed: f32) -> Self {
        self.state.speed = speed;
        self
    }

    pub fn with_speed_parameter(self, param: &AnimatorParameter) -> Self {
        self.state.speed_parameter = Some(param.name.clone());
        self
    }

    pub fn with_cycle_offset(self, offset: f32) -> Self {
        self.state.cycle_offset = offset;
        self
    }

    pub fn with_cycle_offset_parameter(self, param: &AnimatorParameter) -> Self {
        self.state.cycle_offset_parameter = Some(param.name.clone());
        self
    }

    pub fn with_mirror(self, mirror: bool) -> Self {
        self.state.mirror = mirror;
        self
    }

    pub fn with_mirror_parameter(self, param: &AnimatorParameter) -> Self {
        self.state.mirror_parameter = Some(param.name.clone());
        self
    }

    pub fn with_ik_on_feet(self, ik_on_feet: bool) -> Self {
        self.state.ik_on_feet = ik_on_feet;
        self
    }

    pub fn add_behaviour(self, behaviour: StateBehaviour) -> Self {
        self.state.behaviours.push(behaviour);
        self
    }

    /// Append a transition with the canonical settings: instant, no exit
    /// time, fixed duration, ordered interruption, no self-transition.
    pub fn add_transition(self, destination: StateId) -> TransitionBuilder<'a, AnimatorStateTransition> {
        let state = self.state;
        let transitions = &mut state.transitions;
        transitions.push(AnimatorStateTransition {
            destination,
            conditions: Vec::new(),
            has_exit_time: false,
            exit_time: 0.0,
            duration: 0.0,
            has_fixed_duration: true,
            offset: 0.0,
            interruption_source: InterruptionSource::None,
            ordered_interruption: true,
            can_transition_to_self: false,
        });
        let last = transitions.len() - 1;
        TransitionBuilder::new(&mut transitions[last])
    }
}
