//! SmartControlComposer: compiles smart controls into animator layers.
//!
//! Composition is two-phase. `compose` is called once per control and
//! builds everything that depends on that control alone; `finish` runs once
//! afterwards and performs the graph-wide work: building one shared layer
//! per parameter slot, then attaching cross-control parameter drivers after
//! rejecting controls whose actions form a cycle.
//!
//! Binary layer layout (write defaults off):
//!
//! ```text
//! Entry ──enter──▶ Enabled ──leave──▶ Prepare Disabled ──leave──▶ Disabled
//!   │                ▲  ▲                    │ (enter, tried first)   │
//!   └─▶ Disabled ────┘  └────────────────────┘◀───────────────────────┘
//! ```
//!
//! With write defaults on, `Prepare Disabled` is omitted and `Enabled`
//! leaves straight to `Disabled`.

mod binary;
mod cross_control;
mod motion_time;
mod phys_bone;
mod slots;

use dressing_api_core::{
    ControllerType, ItemController, MenuItem, MenuItemType, ObjectId, ParameterConfig, Scene,
};
use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;

use crate::config::AnimatorOptions;
use crate::context::Context;
use crate::control::{
    ControlType, CrossControlActions, DriverType, ParameterSlot, SmartControl,
};
use crate::controller::{AnimatorController, StateId};
use crate::error::Result;
use crate::fluent::AnimatorBuilder;
use crate::ids::{ControlId, SlotId};

pub(crate) const LOG_LABEL: &str = "SmartControlComposer";

/// State names shared by every generated layer.
pub const DISABLED_STATE: &str = "Disabled";
pub const ENABLED_STATE: &str = "Enabled";
pub const PREPARE_DISABLED_STATE: &str = "Prepare Disabled";
pub const MOTION_TIME_STATE: &str = "Motion Time";

/// Where a composed control ended up in the controller.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ControlStates {
    /// On/off layer; `enabled` is the `Motion Time` state for gated
    /// motion-time physics bones.
    Binary {
        layer: usize,
        enabled: StateId,
        disabled: StateId,
        prepare_disabled: Option<StateId>,
    },
    /// Member of a slot layer, resolved during `finish`.
    SlotMember { slot: SlotId, mapped_value: i32 },
    MotionTime { layer: usize, state: StateId },
    /// Nothing was generated; the reason is in the report.
    Skipped,
}

#[derive(Clone, Debug)]
pub(crate) struct ComposedControl {
    pub name: String,
    pub driver_type: DriverType,
    /// Parameter cross-control actions write to, when one exists.
    pub parameter: Option<String>,
    pub states: ControlStates,
    pub actions: CrossControlActions,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct SlotLayerStates {
    pub layer: usize,
    pub parameter: String,
    pub default_value: i32,
    /// control -> (enabled, prepare disabled)
    pub members: HashMap<ControlId, (StateId, StateId)>,
}

pub struct SmartControlComposer<'a> {
    options: &'a AnimatorOptions,
    controller: &'a mut AnimatorController,
    slots: IndexMap<SlotId, ParameterSlot>,
    composed: IndexMap<ControlId, ComposedControl>,
    pending_slots: IndexMap<SlotId, Vec<slots::SlotMember>>,
    slot_layers: HashMap<SlotId, SlotLayerStates>,
    used_names: HashSet<String>,
}

impl<'a> SmartControlComposer<'a> {
    pub fn new(options: &'a AnimatorOptions, controller: &'a mut AnimatorController) -> Self {
        Self {
            options,
            controller,
            slots: IndexMap::new(),
            composed: IndexMap::new(),
            pending_slots: IndexMap::new(),
            slot_layers: HashMap::new(),
            used_names: HashSet::new(),
        }
    }

    /// Register a parameter slot that controls may reference.
    pub fn with_slot(mut self, slot: ParameterSlot) -> Self {
        self.add_slot(slot);
        self
    }

    pub fn add_slot(&mut self, slot: ParameterSlot) {
        self.slots.insert(slot.id, slot);
    }

    pub fn options(&self) -> &AnimatorOptions {
        self.options
    }

    pub fn is_composed(&self, id: ControlId) -> bool {
        self.composed.contains_key(&id)
    }

    fn animator(&mut self) -> AnimatorBuilder<'_> {
        AnimatorBuilder::new(self.options, self.controller)
    }

    /// Compose one control. Composing an already composed control is a no-op.
    pub fn compose(
        &mut self,
        ctx: &mut Context,
        scene: &mut Scene,
        ctrl: &mut SmartControl,
    ) -> Result<()> {
        if self.composed.contains_key(&ctrl.id) {
            log::debug!("{} already composed, skipping", ctrl.id);
            return Ok(());
        }

        let name = suggest_name(scene, ctx.avatar, ctrl);
        let (parameter, states) = match ctrl.driver_type {
            DriverType::ParameterSlot => (
                self.parameter_slot_name(ctrl),
                self.compose_slot_member(ctx, scene, ctrl, &name),
            ),
            DriverType::VrcPhysBone => (None, self.compose_phys_bone(ctx, scene, ctrl, &name)?),
            DriverType::AnimatorParameter | DriverType::MenuItem => {
                let parameter = self.ensure_parameter_name(scene, ctx.avatar, ctrl);
                if ctrl.driver_type == DriverType::MenuItem {
                    wire_menu_item(ctx, scene, ctrl, &name, &parameter);
                }
                add_parameter_config(
                    scene,
                    ctrl.object,
                    ParameterConfig {
                        parameter_name: parameter.clone(),
                        default_value: ctrl.animator_config.default_value,
                        network_synced: ctrl.animator_config.network_synced,
                        saved: ctrl.animator_config.saved,
                    },
                );
                let states = match ctrl.control_type {
                    ControlType::Binary => self.compose_binary(ctx, scene, ctrl, &parameter)?,
                    ControlType::MotionTime => {
                        self.compose_motion_time(ctx, scene, ctrl, &parameter)?
                    }
                };
                (Some(parameter), states)
            }
        };

        self.composed.insert(
            ctrl.id,
            ComposedControl {
                name,
                driver_type: ctrl.driver_type,
                parameter,
                states,
                actions: ctrl.cross_control_actions.clone(),
            },
        );
        Ok(())
    }

    /// Graph-wide finalization: slot layers, then cross-control drivers.
    pub fn finish(mut self, ctx: &mut Context, scene: &mut Scene) -> Result<()> {
        self.build_slot_layers(ctx, scene)?;
        self.wire_cross_controls(ctx);
        Ok(())
    }

    /// The control's parameter name, generating a unique one when unset.
    fn ensure_parameter_name(
        &mut self,
        scene: &Scene,
        avatar: ObjectId,
        ctrl: &mut SmartControl,
    ) -> String {
        match ctrl.animator_config.parameter_name.as_deref() {
            Some(name) if !name.is_empty() => {
                self.used_names.insert(name.to_string());
                name.to_string()
            }
            _ => {
                let generated = self.unique_name(&suggest_name(scene, avatar, ctrl));
                ctrl.animator_config.parameter_name = Some(generated.clone());
                generated
            }
        }
    }

    /// `base`, suffixed until it clashes with neither a name generated in
    /// this pass nor a parameter already on the controller.
    fn unique_name(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 1u32;
        while self.used_names.contains(&name) || self.controller.parameter(&name).is_some() {
            name = format!("{base}_{n}");
            n = n.wrapping_add(1);
        }
        self.used_names.insert(name.clone());
        name
    }
}

/// Human-readable base name for a control: its own name, else its path
/// under the avatar, else its object's name.
pub(crate) fn suggest_name(scene: &Scene, avatar: ObjectId, ctrl: &SmartControl) -> String {
    if let Some(name) = ctrl.name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(path) = scene
        .relative_path(ctrl.object, avatar)
        .filter(|p| !p.is_empty())
    {
        return path;
    }
    scene
        .name(ctrl.object)
        .filter(|n| !n.is_empty())
        .unwrap_or("SmartControl")
        .to_string()
}

fn add_parameter_config(scene: &mut Scene, object: ObjectId, config: ParameterConfig) {
    if let Some(o) = scene.object_mut(object) {
        o.parameter_configs
            .retain(|c| c.parameter_name != config.parameter_name);
        o.parameter_configs.push(config);
    }
}

/// Create or update the menu item on the control's object and point it at
/// `parameter`. Button and Toggle use the single controller, Radial its
/// first sub-controller.
fn wire_menu_item(
    ctx: &mut Context,
    scene: &mut Scene,
    ctrl: &SmartControl,
    name: &str,
    parameter: &str,
) {
    let Some(o) = scene.object_mut(ctrl.object) else {
        return;
    };
    let config = &ctrl.menu_item_config;
    let item = o
        .menu_item
        .get_or_insert_with(|| MenuItem::new(name, config.item_type));
    item.item_type = config.item_type;
    item.icon = config.icon.clone();
    match item.item_type {
        MenuItemType::Button | MenuItemType::Toggle => {
            item.controller.controller_type = ControllerType::AnimatorParameter;
            item.controller.parameter_name = parameter.to_string();
        }
        MenuItemType::Radial => {
            item.sub_controllers = vec![ItemController::parameter(parameter, 1.0)];
        }
        other => {
            ctx.report
                .log_warn(LOG_LABEL, format!("Unsupported menu item type {other:?} on {name}"));
        }
    }
}

/// Values within this distance of 1 count as "enable".
pub(crate) fn is_enable_value(value: f32) -> bool {
    (value - 1.0).abs() < 1e-5
}
