use crate::config::AnimatorOptions;
use crate::controller::{
    AnimatorControllerLayer, AnimatorState, AnimatorStateTransition, AnimatorTransition, StateId,
};

use super::state::StateBuilder;
use super::transition::TransitionBuilder;

const STATE_SPACING: f32 = 60.0;

pub struct LayerBuilder<'a> {
    options: &'a AnimatorOptions,
    layer: &'a mut AnimatorControllerLayer,
    index: usize,
}

impl<'a> LayerBuilder<'a> {
    pub(super) fn new(
        options: &'a AnimatorOptions,
        layer: &'a mut AnimatorControllerLayer,
        index: usize,
    ) -> Self {
        Self {
            options,
            layer,
            index,
        }
    }

    /// Index of this layer in the controller.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.layer.name
    }

    /// New state stacked below the existing ones.
    pub fn new_state(&mut self, name: &str) -> StateBuilder<'_> {
        let y = self.layer.state_machine.states.len() as f32 * STATE_SPACING;
        self.new_state_at(name, [300.0, y])
    }

    /// New state at an explicit graph position. The pass-wide write-defaults
    /// flag is baked in here and never re-derived.
    pub fn new_state_at(&mut self, name: &str, position: [f32; 2]) -> StateBuilder<'_> {
        let machine = &mut self.layer.state_machine;
        machine.states.push(AnimatorState::new(
            name,
            position,
            self.options.write_defaults,
        ));
        let id = StateId(machine.states.len() - 1);
        StateBuilder::new(&mut machine.states[id.0], id)
    }

    pub fn state(&mut self, id: StateId) -> Option<StateBuilder<'_>> {
        let state = self.layer.state_machine.states.get_mut(id.0)?;
        Some(StateBuilder::new(state, id))
    }

    pub fn with_default_state(&mut self, id: StateId) -> &mut Self {
        self.layer.state_machine.default_state = Some(id);
        self
    }

    /// Transition from `from` to `to` with the canonical settings.
    pub fn add_transition(
        &mut self,
        from: StateId,
        to: StateId,
    ) -> Option<TransitionBuilder<'_, AnimatorStateTransition>> {
        self.state(from).map(|s| s.add_transition(to))
    }

    /// Transition from the implicit Entry node.
    pub fn add_entry_transition(&mut self, to: StateId) -> TransitionBuilder<'_, AnimatorTransition> {
        let entries = &mut self.layer.state_machine.entry_transitions;
        entries.push(AnimatorTransition {
            destination: to,
            conditions: Vec::new(),
        });
        let last = entries.len() - 1;
        TransitionBuilder::new(&mut entries[last])
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AnimatorOptions;
    use crate::controller::AnimatorController;
    use crate::fluent::AnimatorBuilder;
    use dressing_api_core::ObjectId;

    #[test]
    fn states_bake_write_defaults_at_creation() {
        let opts = AnimatorOptions::new(ObjectId(0)).with_write_defaults(true);
        let mut ac = AnimatorController::default();
        let mut animator = AnimatorBuilder::new(&opts, &mut ac);
        let mut layer = animator.new_layer("L");
        let a = layer.new_state("A").id();
        let b = layer.new_state("B").id();
        layer.with_default_state(a);
        layer.add_entry_transition(b);
        let machine = &ac.layers[0].state_machine;
        assert!(machine.states.iter().all(|s| s.write_default_values));
        assert_eq!(machine.default_state, Some(a));
        assert_eq!(machine.entry_transitions[0].destination, b);
        assert_ne!(machine.states[0].position, machine.states[1].position);
    }
}
