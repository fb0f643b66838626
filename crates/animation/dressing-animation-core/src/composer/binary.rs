use dressing_api_core::Scene;

use crate::clip::AnimationClip;
use crate::context::Context;
use crate::control::SmartControl;
use crate::controller::{AnimatorCondition, StateId};
use crate::error::Result;
use crate::fluent::{AnimatorBuilder, AnimatorParameter, ClipBuilder, PathResolver};
use crate::properties;

use super::{
    ControlStates, SmartControlComposer, DISABLED_STATE, ENABLED_STATE, PREPARE_DISABLED_STATE,
};

/// Conditions gating an on/off layer. The layer is on while any `enter` set
/// holds and turns off when every condition of `leave` holds.
pub(super) struct Gate {
    pub enter: Vec<Vec<AnimatorCondition>>,
    pub leave: Vec<AnimatorCondition>,
}

impl Gate {
    pub fn bool_parameter(name: &str) -> Self {
        Self {
            enter: vec![vec![AnimatorCondition::if_(name)]],
            leave: vec![AnimatorCondition::if_not(name)],
        }
    }
}

/// Clips and naming for one gated layer.
pub(super) struct GatedLayer<'p> {
    pub name: &'p str,
    pub active_state: &'p str,
    pub active_clip: AnimationClip,
    pub restore_clip: AnimationClip,
    pub disabled_clip: AnimationClip,
    pub time_parameter: Option<&'p AnimatorParameter>,
}

/// Build `Disabled` (default), the active state and, with write defaults
/// off, `Prepare Disabled`, wired in the canonical order.
pub(super) fn build_gated_layer(
    animator: &mut AnimatorBuilder<'_>,
    gated: GatedLayer<'_>,
    gate: &Gate,
) -> ControlStates {
    let write_defaults = animator.options().write_defaults;
    let mut layer = animator.new_layer(gated.name);
    let layer_index = layer.index();

    let disabled = layer
        .new_state(DISABLED_STATE)
        .with_motion(gated.disabled_clip)
        .id();
    let mut active = layer
        .new_state(gated.active_state)
        .with_motion(gated.active_clip);
    if let Some(param) = gated.time_parameter {
        active = active.with_motion_time(param);
    }
    let enabled = active.id();
    let prepare_disabled = (!write_defaults).then(|| {
        layer
            .new_state(PREPARE_DISABLED_STATE)
            .with_motion(gated.restore_clip)
            .id()
    });
    layer.with_default_state(disabled);

    for conditions in &gate.enter {
        layer
            .add_entry_transition(enabled)
            .with_conditions(conditions.iter().cloned());
    }
    wire(&mut layer, disabled, enabled, &gate.enter);

    let off_target = prepare_disabled.unwrap_or(disabled);
    wire(
        &mut layer,
        enabled,
        off_target,
        std::slice::from_ref(&gate.leave),
    );

    if let Some(prepare) = prepare_disabled {
        // re-enabling must be tried before falling through to Disabled
        wire(&mut layer, prepare, enabled, &gate.enter);
        wire(&mut layer, prepare, disabled, std::slice::from_ref(&gate.leave));
    }

    ControlStates::Binary {
        layer: layer_index,
        enabled,
        disabled,
        prepare_disabled,
    }
}

/// One transition `from -> to` per condition set, in order.
pub(super) fn wire(
    layer: &mut crate::fluent::LayerBuilder<'_>,
    from: StateId,
    to: StateId,
    condition_sets: &[Vec<AnimatorCondition>],
) {
    for conditions in condition_sets {
        if let Some(t) = layer.add_transition(from, to) {
            t.with_conditions(conditions.iter().cloned());
        }
    }
}

impl<'a> SmartControlComposer<'a> {
    pub(super) fn compose_binary(
        &mut self,
        ctx: &mut Context,
        scene: &Scene,
        ctrl: &SmartControl,
        parameter: &str,
    ) -> Result<ControlStates> {
        let remapper = ctx.path_remapper();
        let resolver = PathResolver::new(scene, self.options.root, &remapper);
        let mut enabled = ClipBuilder::new(resolver, ctx.new_clip(&format!("{parameter}_Enabled")));
        let mut restore =
            ClipBuilder::new(resolver, ctx.new_clip(&format!("{parameter}_PrepareDisabled")));
        properties::bake_binary(
            scene,
            ctx.avatar,
            self.options.write_defaults,
            ctrl,
            &mut enabled,
            &mut restore,
        );
        let disabled_clip = ctx.new_clip(&format!("{parameter}_Disabled"));

        let mut animator = self.animator();
        let param = animator.bool_parameter_with(
            parameter,
            ctrl.animator_config.default_value != 0.0,
            false,
        )?;
        Ok(build_gated_layer(
            &mut animator,
            GatedLayer {
                name: parameter,
                active_state: ENABLED_STATE,
                active_clip: enabled.build(),
                restore_clip: restore.build(),
                disabled_clip,
                time_parameter: None,
            },
            &Gate::bool_parameter(&param.name),
        ))
    }
}
