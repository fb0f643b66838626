//! Authoring attachments that live on GameObjects: expression menu items and
//! avatar parameter configs. The composer creates or updates these as a side
//! effect of wiring a control.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MenuItemType {
    Button,
    #[default]
    Toggle,
    SubMenu,
    TwoAxis,
    FourAxis,
    Radial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControllerType {
    #[default]
    AnimatorParameter,
}

/// Binds a menu item (or one of its axes) to an animator parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemController {
    #[serde(default)]
    pub controller_type: ControllerType,
    #[serde(default)]
    pub parameter_name: String,
    #[serde(default = "default_parameter_value")]
    pub parameter_value: f32,
}

fn default_parameter_value() -> f32 {
    1.0
}

impl Default for ItemController {
    fn default() -> Self {
        Self {
            controller_type: ControllerType::AnimatorParameter,
            parameter_name: String::new(),
            parameter_value: default_parameter_value(),
        }
    }
}

impl ItemController {
    pub fn parameter(name: impl Into<String>, value: f32) -> Self {
        Self {
            controller_type: ControllerType::AnimatorParameter,
            parameter_name: name.into(),
            parameter_value: value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct MenuItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub item_type: MenuItemType,
    /// Single top-level controller used by Button and Toggle items.
    #[serde(default)]
    pub controller: ItemController,
    /// Per-axis controllers used by Radial and the puppet item types.
    #[serde(default)]
    pub sub_controllers: Vec<ItemController>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, item_type: MenuItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            ..Default::default()
        }
    }
}

/// Registration of an avatar parameter on an object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterConfig {
    pub parameter_name: String,
    #[serde(default)]
    pub default_value: f32,
    #[serde(default = "default_true")]
    pub network_synced: bool,
    #[serde(default = "default_true")]
    pub saved: bool,
}

fn default_true() -> bool {
    true
}
