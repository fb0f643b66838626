//! Smart control descriptors: what a control animates and how it is driven.
//!
//! Controls are plain data authored on scene objects. The composer reads
//! them and writes back only the generated parameter name.

use dressing_api_core::{AssetRef, ComponentRef, MenuItemType, ObjectId};
use serde::{Deserialize, Serialize};

use crate::ids::{ControlId, SlotId};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlType {
    #[default]
    Binary,
    MotionTime,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverType {
    #[default]
    AnimatorParameter,
    MenuItem,
    ParameterSlot,
    VrcPhysBone,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Generated during composition when unset.
    pub parameter_name: Option<String>,
    pub default_value: f32,
    pub network_synced: bool,
    pub saved: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            parameter_name: None,
            default_value: 0.0,
            network_synced: true,
            saved: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemDriverConfig {
    pub item_type: MenuItemType,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSlotConfig {
    pub slot: Option<SlotId>,
    /// Value of the slot parameter that selects this control.
    pub mapped_value: i32,
    pub generate_menu_item: bool,
    pub menu_item_type: MenuItemType,
    pub icon: Option<String>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysBoneCondition {
    None,
    #[default]
    Grabbed,
    Posed,
    GrabbedOrPosed,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhysBoneSource {
    #[default]
    None,
    Angle,
    Stretch,
    Squish,
}

impl PhysBoneSource {
    /// Parameter suffix written by the physics bone for this source.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            PhysBoneSource::None => None,
            PhysBoneSource::Angle => Some("_Angle"),
            PhysBoneSource::Stretch => Some("_Stretch"),
            PhysBoneSource::Squish => Some("_Squish"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysBoneDriverConfig {
    pub phys_bone: Option<ComponentRef>,
    /// Derived from the control's generated name when unset.
    pub parameter_prefix: Option<String>,
    pub condition: PhysBoneCondition,
    pub source: PhysBoneSource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectToggle {
    /// A Transform target toggles the whole GameObject.
    pub target: ComponentRef,
    pub enabled: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    /// Exactly the listed objects.
    #[default]
    Normal,
    /// Everything under the search root except the listed objects.
    Inverted,
    /// Everything under the avatar except the listed objects.
    AvatarWide,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyValue {
    pub name: String,
    /// Binary controls: value while enabled.
    pub value: f32,
    /// MotionTime controls: value at time 0.
    pub from_value: f32,
    /// MotionTime controls: value at time 1.
    pub to_value: f32,
    pub value_object_reference: Option<AssetRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyGroup {
    pub selection: SelectionType,
    pub search_root: Option<ObjectId>,
    pub objects: Vec<ObjectId>,
    pub values: Vec<PropertyValue>,
}

impl PropertyGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected_objects(mut self, objects: impl IntoIterator<Item = ObjectId>) -> Self {
        self.selection = SelectionType::Normal;
        self.objects = objects.into_iter().collect();
        self
    }

    /// Select everything under `root` except `ignored`.
    pub fn search_in(mut self, root: ObjectId, ignored: impl IntoIterator<Item = ObjectId>) -> Self {
        self.selection = SelectionType::Inverted;
        self.search_root = Some(root);
        self.objects = ignored.into_iter().collect();
        self
    }

    /// Exclude `ignored` from an inverted or avatar-wide selection.
    pub fn with_ignored_objects(mut self, ignored: impl IntoIterator<Item = ObjectId>) -> Self {
        self.objects.extend(ignored);
        self
    }

    pub fn with_avatar_wide(mut self) -> Self {
        self.selection = SelectionType::AvatarWide;
        self
    }

    pub fn with_avatar_wide_and_ignore(self, ignored: impl IntoIterator<Item = ObjectId>) -> Self {
        self.with_avatar_wide().with_ignored_objects(ignored)
    }

    pub fn change_property(mut self, name: impl Into<String>, value: f32) -> Self {
        self.values.push(PropertyValue {
            name: name.into(),
            value,
            ..Default::default()
        });
        self
    }

    pub fn change_property_range(mut self, name: impl Into<String>, from: f32, to: f32) -> Self {
        self.values.push(PropertyValue {
            name: name.into(),
            from_value: from,
            to_value: to,
            ..Default::default()
        });
        self
    }

    pub fn change_property_reference(mut self, name: impl Into<String>, value: AssetRef) -> Self {
        self.values.push(PropertyValue {
            name: name.into(),
            value_object_reference: Some(value),
            ..Default::default()
        });
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlValue {
    pub control: ControlId,
    pub value: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossControlActions {
    pub values_on_enable: Vec<ControlValue>,
    pub values_on_disable: Vec<ControlValue>,
}

impl CrossControlActions {
    pub fn is_empty(&self) -> bool {
        self.values_on_enable.is_empty() && self.values_on_disable.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmartControl {
    pub id: ControlId,
    pub name: Option<String>,
    /// Owning object; menu items and parameter configs are attached here.
    pub object: ObjectId,
    #[serde(default)]
    pub driver_type: DriverType,
    #[serde(default)]
    pub control_type: ControlType,
    #[serde(default)]
    pub animator_config: AnimatorConfig,
    #[serde(default)]
    pub menu_item_config: MenuItemDriverConfig,
    #[serde(default)]
    pub slot_config: ParameterSlotConfig,
    #[serde(default)]
    pub phys_bone_config: PhysBoneDriverConfig,
    #[serde(default)]
    pub object_toggles: Vec<ObjectToggle>,
    #[serde(default)]
    pub property_groups: Vec<PropertyGroup>,
    #[serde(default)]
    pub cross_control_actions: CrossControlActions,
}

impl SmartControl {
    pub fn new(id: ControlId, object: ObjectId) -> Self {
        Self {
            id,
            name: None,
            object,
            driver_type: DriverType::AnimatorParameter,
            control_type: ControlType::Binary,
            animator_config: AnimatorConfig::default(),
            menu_item_config: MenuItemDriverConfig::default(),
            slot_config: ParameterSlotConfig::default(),
            phys_bone_config: PhysBoneDriverConfig::default(),
            object_toggles: Vec::new(),
            property_groups: Vec::new(),
            cross_control_actions: CrossControlActions::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_driver_type(mut self, driver: DriverType) -> Self {
        self.driver_type = driver;
        self
    }

    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.animator_config.parameter_name = Some(name.into());
        self
    }

    pub fn with_menu_item(mut self, item_type: MenuItemType, icon: Option<String>) -> Self {
        self.driver_type = DriverType::MenuItem;
        self.menu_item_config = MenuItemDriverConfig { item_type, icon };
        self
    }

    pub fn with_parameter_slot(mut self, slot: SlotId, mapped_value: i32) -> Self {
        self.driver_type = DriverType::ParameterSlot;
        self.slot_config.slot = Some(slot);
        self.slot_config.mapped_value = mapped_value;
        self
    }

    pub fn with_slot_menu_item(mut self, item_type: MenuItemType) -> Self {
        self.slot_config.generate_menu_item = true;
        self.slot_config.menu_item_type = item_type;
        self
    }

    pub fn with_phys_bone(
        mut self,
        phys_bone: ComponentRef,
        condition: PhysBoneCondition,
        source: PhysBoneSource,
    ) -> Self {
        self.driver_type = DriverType::VrcPhysBone;
        self.phys_bone_config.phys_bone = Some(phys_bone);
        self.phys_bone_config.condition = condition;
        self.phys_bone_config.source = source;
        self
    }

    pub fn as_binary(mut self) -> Self {
        self.control_type = ControlType::Binary;
        self
    }

    pub fn as_motion_time(mut self) -> Self {
        self.control_type = ControlType::MotionTime;
        self
    }

    pub fn toggle(mut self, target: ComponentRef, enabled: bool) -> Self {
        self.object_toggles.push(ObjectToggle { target, enabled });
        self
    }

    pub fn add_property_group(mut self, group: PropertyGroup) -> Self {
        self.property_groups.push(group);
        self
    }

    pub fn cross_control_value_on_enable(mut self, control: ControlId, value: f32) -> Self {
        self.cross_control_actions
            .values_on_enable
            .push(ControlValue { control, value });
        self
    }

    pub fn cross_control_value_on_disable(mut self, control: ControlId, value: f32) -> Self {
        self.cross_control_actions
            .values_on_disable
            .push(ControlValue { control, value });
        self
    }
}

/// A shared integer parameter selecting at most one control of a group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterSlot {
    pub id: SlotId,
    /// Parameter configs for the slot are attached here.
    pub object: ObjectId,
    pub parameter_name: String,
    #[serde(default)]
    pub default_value: i32,
    #[serde(default = "default_true")]
    pub network_synced: bool,
    #[serde(default = "default_true")]
    pub saved: bool,
}

fn default_true() -> bool {
    true
}

impl ParameterSlot {
    pub fn new(id: SlotId, object: ObjectId, parameter_name: impl Into<String>) -> Self {
        Self {
            id,
            object,
            parameter_name: parameter_name.into(),
            default_value: 0,
            network_synced: true,
            saved: true,
        }
    }

    pub fn with_default_value(mut self, value: i32) -> Self {
        self.default_value = value;
        self
    }
}
