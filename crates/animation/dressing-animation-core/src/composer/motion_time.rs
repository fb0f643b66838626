use dressing_api_core::Scene;

use crate::context::Context;
use crate::control::SmartControl;
use crate::error::Result;
use crate::fluent::{AnimatorParameter, ClipBuilder, PathResolver};
use crate::properties;

use super::{ControlStates, SmartControlComposer, MOTION_TIME_STATE};

impl<'a> SmartControlComposer<'a> {
    pub(super) fn compose_motion_time(
        &mut self,
        ctx: &mut Context,
        scene: &Scene,
        ctrl: &SmartControl,
        parameter: &str,
    ) -> Result<ControlStates> {
        let param = self.animator().float_parameter_with(
            parameter,
            ctrl.animator_config.default_value,
            false,
        )?;
        self.motion_time_layer(ctx, scene, ctrl, parameter, &param)
    }

    /// Single default `Motion Time` state whose normalized time follows
    /// `time_parameter`.
    pub(super) fn motion_time_layer(
        &mut self,
        ctx: &mut Context,
        scene: &Scene,
        ctrl: &SmartControl,
        layer_name: &str,
        time_parameter: &AnimatorParameter,
    ) -> Result<ControlStates> {
        let remapper = ctx.path_remapper();
        let resolver = PathResolver::new(scene, self.options.root, &remapper);
        let mut clip = ClipBuilder::new(resolver, ctx.new_clip(&format!("{layer_name}_MotionTime")));
        properties::bake_motion_time(scene, ctx.avatar, ctrl, &mut clip, None);

        let mut animator = self.animator();
        let mut layer = animator.new_layer(layer_name);
        let layer_index = layer.index();
        let state = layer
            .new_state(MOTION_TIME_STATE)
            .with_motion(clip.build())
            .with_motion_time(time_parameter)
            .id();
        layer.with_default_state(state);
        Ok(ControlStates::MotionTime {
            layer: layer_index,
            state,
        })
    }
}
