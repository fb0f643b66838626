//! Components attached to GameObjects and the property capability the
//! generators use to sample current values.
//!
//! Instead of reflecting over arbitrary serialized objects, each component
//! answers `property(path)` for the paths it knows how to resolve:
//! - `blendShape.<key>`           renderer blendshape weight
//! - `material.<prop>`            property of the first material
//! - `m_Materials.Array.data[i]`  object reference to the i-th material
//! - `m_Enabled`                  enabled flag of a Behaviour
//! - anything else                the generic serialized property table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::scene::ObjectId;
use crate::value::{AssetRef, Value, ValueKind};

/// Closed set of component categories with distinct curve-binding rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComponentKind {
    /// The object's Transform; toggling it toggles the GameObject.
    Transform,
    /// Anything with an `enabled` flag.
    #[default]
    Behaviour,
    /// Components without a toggleable state.
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blendshape {
    pub name: String,
    #[serde(default)]
    pub weight: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub type_name: String,
    #[serde(default)]
    pub kind: ComponentKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    /// Present only on renderers that carry a mesh with blendshapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blendshapes: Option<Vec<Blendshape>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
}

fn default_true() -> bool {
    true
}

/// Address of a component: owning object plus index in its component list.
/// Index 0 is always the object's Transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRef {
    pub object: ObjectId,
    pub index: usize,
}

impl ComponentRef {
    pub fn new(object: ObjectId, index: usize) -> Self {
        Self { object, index }
    }

    /// The Transform of `object`.
    pub fn transform(object: ObjectId) -> Self {
        Self { object, index: 0 }
    }
}

/// One entry of [`Component::enumerate_properties`].
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyInfo {
    pub path: String,
    pub kind: ValueKind,
    pub value: Value,
}

const BLENDSHAPE_PREFIX: &str = "blendShape.";
const MATERIAL_PREFIX: &str = "material.";
const MATERIAL_SLOT_PREFIX: &str = "m_Materials.Array.data[";

impl Component {
    pub fn new(type_name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            enabled: true,
            properties: IndexMap::new(),
            blendshapes: None,
            materials: Vec::new(),
        }
    }

    pub fn transform() -> Self {
        Self::new("Transform", ComponentKind::Transform)
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_blendshape(mut self, name: impl Into<String>, weight: f32) -> Self {
        self.blendshapes.get_or_insert_with(Vec::new).push(Blendshape {
            name: name.into(),
            weight,
        });
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    /// Whether this component is a renderer carrying a mesh with blendshapes.
    pub fn has_mesh(&self) -> bool {
        self.blendshapes.is_some()
    }

    pub fn blendshape_weight(&self, name: &str) -> Option<f32> {
        self.blendshapes
            .as_ref()?
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.weight)
    }

    /// Resolve the current value of an animatable property path.
    pub fn property(&self, path: &str) -> Option<Value> {
        if let Some(key) = path.strip_prefix(BLENDSHAPE_PREFIX) {
            return self.blendshape_weight(key).map(Value::Float);
        }
        if let Some(prop) = path.strip_prefix(MATERIAL_PREFIX) {
            return self.materials.first()?.properties.get(prop).cloned();
        }
        if let Some(rest) = path.strip_prefix(MATERIAL_SLOT_PREFIX) {
            let index: usize = rest.strip_suffix(']')?.parse().ok()?;
            return self
                .materials
                .get(index)
                .map(|m| Value::ObjectRef(AssetRef::new(m.name.clone())));
        }
        if path == "m_Enabled" && self.kind == ComponentKind::Behaviour {
            return Some(Value::Bool(self.enabled));
        }
        self.properties.get(path).cloned()
    }

    /// Write a property through the same path grammar as [`Component::property`].
    /// Returns false when the path does not resolve on this component.
    pub fn set_property(&mut self, path: &str, value: Value) -> bool {
        if let Some(key) = path.strip_prefix(BLENDSHAPE_PREFIX) {
            let Some(weight) = value.as_float() else {
                return false;
            };
            return match self
                .blendshapes
                .as_mut()
                .and_then(|list| list.iter_mut().find(|b| b.name == key))
            {
                Some(b) => {
                    b.weight = weight;
                    true
                }
                None => false,
            };
        }
        if path == "m_Enabled" && self.kind == ComponentKind::Behaviour {
            return match value {
                Value::Bool(b) => {
                    self.enabled = b;
                    true
                }
                _ => false,
            };
        }
        self.properties.insert(path.to_string(), value);
        true
    }

    /// Every property path this component exposes along with its current value.
    pub fn enumerate_properties(&self) -> Vec<PropertyInfo> {
        let mut out = Vec::new();
        let mut push = |path: String, value: Value| {
            out.push(PropertyInfo {
                path,
                kind: value.kind(),
                value,
            });
        };
        if self.kind == ComponentKind::Behaviour {
            push("m_Enabled".into(), Value::Bool(self.enabled));
        }
        if let Some(shapes) = &self.blendshapes {
            for b in shapes {
                push(format!("{BLENDSHAPE_PREFIX}{}", b.name), Value::Float(b.weight));
            }
        }
        for (i, m) in self.materials.iter().enumerate() {
            push(
                format!("{MATERIAL_SLOT_PREFIX}{i}]"),
                Value::ObjectRef(AssetRef::new(m.name.clone())),
            );
        }
        if let Some(first) = self.materials.first() {
            for (name, value) in &first.properties {
                push(format!("{MATERIAL_PREFIX}{name}"), value.clone());
            }
        }
        for (name, value) in &self.properties {
            push(name.clone(), value.clone());
        }
        out
    }
}
