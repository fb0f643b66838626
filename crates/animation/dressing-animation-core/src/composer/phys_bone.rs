//! Controls driven by a physics bone's own parameters.
//!
//! The bone publishes `{prefix}_IsGrabbed`, `{prefix}_IsPosed` and one float
//! per source (`{prefix}_Angle`, ...). The condition gates the layer the same
//! way a bool parameter gates a binary control; a source adds a motion-time
//! state driven by the matching float.

use dressing_api_core::{Scene, Value};

use crate::context::Context;
use crate::control::{PhysBoneCondition, PhysBoneSource, SmartControl};
use crate::controller::AnimatorCondition;
use crate::error::Result;
use crate::fluent::{ClipBuilder, PathResolver};
use crate::properties;

use super::binary::{build_gated_layer, Gate, GatedLayer};
use super::{ControlStates, SmartControlComposer, ENABLED_STATE, LOG_LABEL, MOTION_TIME_STATE};

/// Property of the physics bone component holding its parameter prefix.
pub const PHYS_BONE_PARAMETER_PROPERTY: &str = "parameter";

const IS_GRABBED_SUFFIX: &str = "_IsGrabbed";
const IS_POSED_SUFFIX: &str = "_IsPosed";

/// Parameter-safe form of a control name: anything outside `[A-Za-z0-9]`
/// becomes `_`.
pub(crate) fn sanitize_prefix(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn gate_for(condition: PhysBoneCondition, prefix: &str) -> Option<Gate> {
    let grabbed = format!("{prefix}{IS_GRABBED_SUFFIX}");
    let posed = format!("{prefix}{IS_POSED_SUFFIX}");
    match condition {
        PhysBoneCondition::None => None,
        PhysBoneCondition::Grabbed => Some(Gate::bool_parameter(&grabbed)),
        PhysBoneCondition::Posed => Some(Gate::bool_parameter(&posed)),
        PhysBoneCondition::GrabbedOrPosed => Some(Gate {
            enter: vec![
                vec![AnimatorCondition::if_(grabbed.as_str())],
                vec![AnimatorCondition::if_(posed.as_str())],
            ],
            leave: vec![
                AnimatorCondition::if_not(grabbed.as_str()),
                AnimatorCondition::if_not(posed.as_str()),
            ],
        }),
    }
}

impl<'a> SmartControlComposer<'a> {
    pub(super) fn compose_phys_bone(
        &mut self,
        ctx: &mut Context,
        scene: &mut Scene,
        ctrl: &mut SmartControl,
        name: &str,
    ) -> Result<ControlStates> {
        let config = ctrl.phys_bone_config.clone();
        let Some(bone) = config.phys_bone.filter(|r| scene.component(*r).is_some()) else {
            ctx.report
                .log_warn(LOG_LABEL, format!("{name} has no physics bone assigned, skipping"));
            return Ok(ControlStates::Skipped);
        };
        if config.condition == PhysBoneCondition::None && config.source == PhysBoneSource::None {
            ctx.report.log_warn(
                LOG_LABEL,
                format!("{name} has neither a condition nor a source, skipping"),
            );
            return Ok(ControlStates::Skipped);
        }

        let prefix = config
            .parameter_prefix
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| sanitize_prefix(name));
        ctrl.phys_bone_config.parameter_prefix = Some(prefix.clone());
        if let Some(component) = scene.component_mut(bone) {
            component.set_property(PHYS_BONE_PARAMETER_PROPERTY, Value::Text(prefix.clone()));
        }

        let mut animator = self.animator();
        let gate = gate_for(config.condition, &prefix);
        if matches!(
            config.condition,
            PhysBoneCondition::Grabbed | PhysBoneCondition::GrabbedOrPosed
        ) {
            animator.bool_parameter(&format!("{prefix}{IS_GRABBED_SUFFIX}"))?;
        }
        if matches!(
            config.condition,
            PhysBoneCondition::Posed | PhysBoneCondition::GrabbedOrPosed
        ) {
            animator.bool_parameter(&format!("{prefix}{IS_POSED_SUFFIX}"))?;
        }
        let source = match config.source.suffix() {
            Some(suffix) => Some(animator.float_parameter(&format!("{prefix}{suffix}"))?),
            None => None,
        };

        let scene: &Scene = scene;
        let Some(gate) = gate else {
            // ungated source: a plain motion-time layer
            return match source {
                Some(param) => self.motion_time_layer(ctx, scene, ctrl, &prefix, &param),
                None => Ok(ControlStates::Skipped),
            };
        };

        let remapper = ctx.path_remapper();
        let resolver = PathResolver::new(scene, self.options.root, &remapper);
        let write_defaults = self.options.write_defaults;
        let disabled_clip = ctx.new_clip(&format!("{prefix}_Disabled"));
        let mut restore =
            ClipBuilder::new(resolver, ctx.new_clip(&format!("{prefix}_PrepareDisabled")));

        let (active_state, active_clip) = match &source {
            None => {
                let mut enabled = ClipBuilder::new(resolver, ctx.new_clip(&format!("{prefix}_Enabled")));
                properties::bake_binary(scene, ctx.avatar, write_defaults, ctrl, &mut enabled, &mut restore);
                (ENABLED_STATE, enabled.build())
            }
            Some(_) => {
                let mut clip = ClipBuilder::new(resolver, ctx.new_clip(&format!("{prefix}_MotionTime")));
                let restore_into = (!write_defaults).then_some(&mut restore);
                properties::bake_motion_time(scene, ctx.avatar, ctrl, &mut clip, restore_into);
                (MOTION_TIME_STATE, clip.build())
            }
        };

        let mut animator = self.animator();
        Ok(build_gated_layer(
            &mut animator,
            GatedLayer {
                name: &prefix,
                active_state,
                active_clip,
                restore_clip: restore.build(),
                disabled_clip,
                time_parameter: source.as_ref(),
            },
            &gate,
        ))
    }
}
