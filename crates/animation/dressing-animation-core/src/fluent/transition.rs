use crate::controller::{
    AnimatorCondition, AnimatorStateTransition, AnimatorTransition, ConditionMode,
};

use super::animator::AnimatorParameter;

/// Anything that carries an AND-ed condition list.
pub trait Conditioned {
    fn conditions_mut(&mut self) -> &mut Vec<AnimatorCondition>;
}

impl Conditioned for AnimatorStateTransition {
    fn conditions_mut(&mut self) -> &mut Vec<AnimatorCondition> {
        &mut self.conditions
    }
}

impl Conditioned for AnimatorTransition {
    fn conditions_mut(&mut self) -> &mut Vec<AnimatorCondition> {
        &mut self.conditions
    }
}

impl AnimatorCondition {
    pub fn new(mode: ConditionMode, parameter: impl Into<String>, threshold: f32) -> Self {
        Self {
            mode,
            parameter: parameter.into(),
            threshold,
        }
    }

    pub fn if_(parameter: impl Into<String>) -> Self {
        Self::new(ConditionMode::If, parameter, 0.0)
    }

    pub fn if_not(parameter: impl Into<String>) -> Self {
        Self::new(ConditionMode::IfNot, parameter, 0.0)
    }

    pub fn equals(parameter: impl Into<String>, value: f32) -> Self {
        Self::new(ConditionMode::Equals, parameter, value)
    }

    pub fn not_equal(parameter: impl Into<String>, value: f32) -> Self {
        Self::new(ConditionMode::NotEqual, parameter, value)
    }
}

/// Appends conditions to one transition; every call ANDs another condition.
pub struct TransitionBuilder<'a, T: Conditioned> {
    transition: &'a mut T,
}

impl<'a, T: Conditioned> TransitionBuilder<'a, T> {
    pub(super) fn new(transition: &'a mut T) -> Self {
        Self { transition }
    }

    fn push(self, mode: ConditionMode, param: &AnimatorParameter, threshold: f32) -> Self {
        self.transition
            .conditions_mut()
            .push(AnimatorCondition::new(mode, param.name.clone(), threshold));
        self
    }

    pub fn if_(self, param: &AnimatorParameter) -> Self {
        self.push(ConditionMode::If, param, 0.0)
    }

    pub fn if_not(self, param: &AnimatorParameter) -> Self {
        self.push(ConditionMode::IfNot, param, 0.0)
    }

    pub fn equals(self, param: &AnimatorParameter, value: f32) -> Self {
        self.push(ConditionMode::Equals, param, value)
    }

    pub fn not_equals(self, param: &AnimatorParameter, value: f32) -> Self {
        self.push(ConditionMode::NotEqual, param, value)
    }

    pub fn greater(self, param: &AnimatorParameter, value: f32) -> Self {
        self.push(ConditionMode::Greater, param, value)
    }

    pub fn less(self, param: &AnimatorParameter, value: f32) -> Self {
        self.push(ConditionMode::Less, param, value)
    }

    /// Append prebuilt conditions in order.
    pub fn with_conditions<I>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = AnimatorCondition>,
    {
        self.transition.conditions_mut().extend(conditions);
        self
    }
}
