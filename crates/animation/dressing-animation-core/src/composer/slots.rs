//! Parameter slots: mutually exclusive controls sharing one int parameter.
//!
//! Members are baked during `compose` and laid out in a single layer during
//! `finish`:
//! - `Entry` and `Disabled` enter member `i` on `slot == v_i`
//! - `i Enabled` leaves to its own `Prepare Disabled` on `slot != v_i`
//! - `i Prepare Disabled` tries every other member's `slot == v_j` first and
//!   falls back to `Disabled` on `slot != v_i` last

use dressing_api_core::{ItemController, MenuItem, MenuItemType, ParameterConfig, Scene};
use hashbrown::HashMap;

use crate::clip::AnimationClip;
use crate::context::Context;
use crate::control::SmartControl;
use crate::controller::AnimatorCondition;
use crate::error::Result;
use crate::fluent::{ClipBuilder, PathResolver};
use crate::ids::ControlId;
use crate::properties;

use super::binary::wire;
use super::{
    add_parameter_config, ControlStates, SlotLayerStates, SmartControlComposer, DISABLED_STATE,
    ENABLED_STATE, LOG_LABEL, PREPARE_DISABLED_STATE,
};

#[derive(Clone, Debug)]
pub(crate) struct SlotMember {
    pub control: ControlId,
    pub name: String,
    pub mapped_value: i32,
    pub enabled_clip: AnimationClip,
    pub restore_clip: AnimationClip,
}

impl<'a> SmartControlComposer<'a> {
    pub(super) fn parameter_slot_name(&self, ctrl: &SmartControl) -> Option<String> {
        let slot = ctrl.slot_config.slot?;
        self.slots.get(&slot).map(|s| s.parameter_name.clone())
    }

    pub(super) fn compose_slot_member(
        &mut self,
        ctx: &mut Context,
        scene: &mut Scene,
        ctrl: &mut SmartControl,
        name: &str,
    ) -> ControlStates {
        let Some(slot_id) = ctrl.slot_config.slot else {
            ctx.report
                .log_error(LOG_LABEL, format!("{name} is driven by a parameter slot but has none assigned"));
            return ControlStates::Skipped;
        };
        let Some(slot) = self.slots.get(&slot_id) else {
            ctx.report
                .log_error(LOG_LABEL, format!("{name} references unknown {slot_id}"));
            return ControlStates::Skipped;
        };
        let parameter = slot.parameter_name.clone();
        let mapped_value = ctrl.slot_config.mapped_value;

        let members = self.pending_slots.entry(slot_id).or_default();
        if let Some(existing) = members.iter().find(|m| m.mapped_value == mapped_value) {
            ctx.report.log_error(
                LOG_LABEL,
                format!(
                    "{name} maps {parameter} = {mapped_value}, already used by {}",
                    existing.name
                ),
            );
            return ControlStates::Skipped;
        }

        let remapper = ctx.path_remapper();
        let resolver = PathResolver::new(scene, self.options.root, &remapper);
        let mut enabled =
            ClipBuilder::new(resolver, ctx.new_clip(&format!("{parameter}_{name}_Enabled")));
        let mut restore = ClipBuilder::new(
            resolver,
            ctx.new_clip(&format!("{parameter}_{name}_PrepareDisabled")),
        );
        properties::bake_binary(
            scene,
            ctx.avatar,
            self.options.write_defaults,
            ctrl,
            &mut enabled,
            &mut restore,
        );
        let member = SlotMember {
            control: ctrl.id,
            name: name.to_string(),
            mapped_value,
            enabled_clip: enabled.build(),
            restore_clip: restore.build(),
        };
        self.pending_slots.entry(slot_id).or_default().push(member);

        ctrl.animator_config.parameter_name = Some(parameter.clone());
        if ctrl.slot_config.generate_menu_item {
            slot_menu_item(ctx, scene, ctrl, name, &parameter);
        }

        ControlStates::SlotMember {
            slot: slot_id,
            mapped_value,
        }
    }

    pub(super) fn build_slot_layers(&mut self, ctx: &mut Context, scene: &mut Scene) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_slots);
        for (slot_id, members) in pending {
            let Some(slot) = self.slots.get(&slot_id).cloned() else {
                continue;
            };
            let disabled_clip = ctx.new_clip(&format!("{}_Disabled", slot.parameter_name));

            let mut animator = self.animator();
            let param = animator.int_parameter_with(&slot.parameter_name, slot.default_value, false)?;
            let mut layer = animator.new_layer(&slot.parameter_name);
            let layer_index = layer.index();

            let disabled = layer.new_state(DISABLED_STATE).with_motion(disabled_clip).id();
            layer.with_default_state(disabled);

            let mut states = Vec::with_capacity(members.len());
            for m in members {
                let enabled = layer
                    .new_state(&format!("{} {ENABLED_STATE}", m.name))
                    .with_motion(m.enabled_clip)
                    .id();
                let prepare = layer
                    .new_state(&format!("{} {PREPARE_DISABLED_STATE}", m.name))
                    .with_motion(m.restore_clip)
                    .id();
                states.push((m.control, m.mapped_value as f32, enabled, prepare));
            }

            let select = |value: f32| vec![AnimatorCondition::equals(&param.name, value)];
            let deselect = |value: f32| vec![AnimatorCondition::not_equal(&param.name, value)];

            for &(_, value, enabled, _) in &states {
                layer.add_entry_transition(enabled).with_conditions(select(value));
            }
            for &(_, value, enabled, _) in &states {
                wire(&mut layer, disabled, enabled, &[select(value)]);
            }
            for &(_, value, enabled, prepare) in &states {
                wire(&mut layer, enabled, prepare, &[deselect(value)]);
            }
            for &(control, value, _, prepare) in &states {
                for &(other, other_value, other_enabled, _) in &states {
                    if other != control {
                        wire(&mut layer, prepare, other_enabled, &[select(other_value)]);
                    }
                }
                wire(&mut layer, prepare, disabled, &[deselect(value)]);
            }

            let members: HashMap<ControlId, _> = states
                .iter()
                .map(|&(control, _, enabled, prepare)| (control, (enabled, prepare)))
                .collect();
            self.slot_layers.insert(
                slot_id,
                SlotLayerStates {
                    layer: layer_index,
                    parameter: slot.parameter_name.clone(),
                    default_value: slot.default_value,
                    members,
                },
            );
            add_parameter_config(
                scene,
                slot.object,
                ParameterConfig {
                    parameter_name: slot.parameter_name.clone(),
                    default_value: slot.default_value as f32,
                    network_synced: slot.network_synced,
                    saved: slot.saved,
                },
            );
        }
        Ok(())
    }
}

/// Menu item selecting this member: the slot parameter set to its value.
fn slot_menu_item(ctx: &mut Context, scene: &mut Scene, ctrl: &SmartControl, name: &str, parameter: &str) {
    let item_type = ctrl.slot_config.menu_item_type;
    if !matches!(item_type, MenuItemType::Button | MenuItemType::Toggle) {
        ctx.report.log_warn(
            LOG_LABEL,
            format!("Slot menu items must be Button or Toggle, {name} asked for {item_type:?}"),
        );
        return;
    }
    let Some(o) = scene.object_mut(ctrl.object) else {
        return;
    };
    let item = o
        .menu_item
        .get_or_insert_with(|| MenuItem::new(name, item_type));
    item.item_type = item_type;
    item.icon = ctrl.slot_config.icon.clone();
    item.controller = ItemController::parameter(parameter, ctrl.slot_config.mapped_value as f32);
}
