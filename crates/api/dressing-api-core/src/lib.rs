//! dressing-api-core: engine-agnostic scene model consumed by the animator generators.
//!
//! The crate models only what the generators need from the host editor: a
//! GameObject hierarchy with components, the values those components expose,
//! and the authoring attachments (menu items, parameter configs) the composer
//! reads and writes.

pub mod component;
pub mod json;
pub mod menu;
pub mod scene;
pub mod scene_path;
pub mod value;

pub use component::{Blendshape, Component, ComponentKind, ComponentRef, Material, PropertyInfo};
pub use menu::{ControllerType, ItemController, MenuItem, MenuItemType, ParameterConfig};
pub use json::{parse_scene, JsonError};
pub use scene::{GameObject, ObjectId, Scene, SceneError};
pub use scene_path::ScenePath;
pub use value::{AssetRef, Value, ValueKind};
