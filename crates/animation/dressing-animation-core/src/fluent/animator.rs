use crate::config::AnimatorOptions;
use crate::controller::{
    AnimatorController, AnimatorControllerLayer, AnimatorControllerParameter,
    AnimatorStateMachine, ParameterType,
};
use crate::error::{ComposeError, Result};

use super::layer::LayerBuilder;

/// Handle to a parameter that exists on the controller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimatorParameter {
    pub name: String,
    pub parameter_type: ParameterType,
}

pub struct AnimatorBuilder<'a> {
    options: &'a AnimatorOptions,
    controller: &'a mut AnimatorController,
}

impl<'a> AnimatorBuilder<'a> {
    pub fn new(options: &'a AnimatorOptions, controller: &'a mut AnimatorController) -> Self {
        Self { options, controller }
    }

    pub fn options(&self) -> &AnimatorOptions {
        self.options
    }

    pub fn controller(&self) -> &AnimatorController {
        self.controller
    }

    /// Reuse the parameter called `name` if it has the same type, otherwise
    /// create it. `forced` drops any existing parameter of that name first.
    fn parameter(
        &mut self,
        name: &str,
        parameter_type: ParameterType,
        forced: bool,
        init: impl FnOnce(&mut AnimatorControllerParameter),
    ) -> Result<AnimatorParameter> {
        if forced {
            self.controller.parameters.retain(|p| p.name != name);
        } else if let Some(existing) = self.controller.parameter(name) {
            if existing.parameter_type != parameter_type {
                return Err(ComposeError::ParameterTypeMismatch {
                    name: name.to_string(),
                    expected: parameter_type,
                    actual: existing.parameter_type,
                });
            }
            return Ok(AnimatorParameter {
                name: name.to_string(),
                parameter_type,
            });
        }
        let mut param = AnimatorControllerParameter {
            name: name.to_string(),
            parameter_type,
            default_float: 0.0,
            default_int: 0,
            default_bool: false,
        };
        init(&mut param);
        self.controller.parameters.push(param);
        Ok(AnimatorParameter {
            name: name.to_string(),
            parameter_type,
        })
    }

    pub fn bool_parameter(&mut self, name: &str) -> Result<AnimatorParameter> {
        self.bool_parameter_with(name, false, false)
    }

    pub fn bool_parameter_with(
        &mut self,
        name: &str,
        default_value: bool,
        forced: bool,
    ) -> Result<AnimatorParameter> {
        self.parameter(name, ParameterType::Bool, forced, |p| {
            p.default_bool = default_value
        })
    }

    pub fn int_parameter(&mut self, name: &str) -> Result<AnimatorParameter> {
        self.int_parameter_with(name, 0, false)
    }

    pub fn int_parameter_with(
        &mut self,
        name: &str,
        default_value: i32,
        forced: bool,
    ) -> Result<AnimatorParameter> {
        self.parameter(name, ParameterType::Int, forced, |p| {
            p.default_int = default_value
        })
    }

    pub fn float_parameter(&mut self, name: &str) -> Result<AnimatorParameter> {
        self.float_parameter_with(name, 0.0, false)
    }

    pub fn float_parameter_with(
        &mut self,
        name: &str,
        default_value: f32,
        forced: bool,
    ) -> Result<AnimatorParameter> {
        self.parameter(name, ParameterType::Float, forced, |p| {
            p.default_float = default_value
        })
    }

    /// Append a full-weight layer with an empty state machine.
    pub fn new_layer(&mut self, name: &str) -> LayerBuilder<'_> {
        self.controller.layers.push(AnimatorControllerLayer {
            name: name.to_string(),
            default_weight: 1.0,
            state_machine: AnimatorStateMachine::default(),
        });
        let index = self.controller.layers.len() - 1;
        LayerBuilder::new(self.options, &mut self.controller.layers[index], index)
    }

    pub fn layer(&mut self, index: usize) -> Option<LayerBuilder<'_>> {
        let layer = self.controller.layers.get_mut(index)?;
        Some(LayerBuilder::new(self.options, layer, index))
    }

    pub fn layer_count(&self) -> usize {
        self.controller.layers.len()
    }
}
