//! Value: current property values sampled from the scene.
//! All numeric types use f32, matching the float curves the generators emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse kind of a [`Value`], used for quick dispatch when baking curves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Int,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    ColorRgba,
    ObjectRef,
    Text,
}

/// Opaque reference to an asset (material, texture, mesh) by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Integer (serialized ints, enum indices)
    Int(i32),

    /// Boolean
    Bool(bool),

    /// 2D vector
    Vec2([f32; 2]),

    /// 3D vector
    Vec3([f32; 3]),

    /// 4D vector
    Vec4([f32; 4]),

    /// RGBA color
    ColorRgba([f32; 4]),

    /// Reference to another asset; animated with object-reference curves
    #[serde(rename = "ref")]
    ObjectRef(AssetRef),

    /// Text / string; never animated
    Text(String),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::ObjectRef(_) => ValueKind::ObjectRef,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Scalar view used when baking float curves. Bools map to 0/1 and ints
    /// widen, everything else has no scalar form.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f32),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_object_ref(&self) -> Option<&AssetRef> {
        match self {
            Value::ObjectRef(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn object_ref(name: impl Into<String>) -> Self {
        Value::ObjectRef(AssetRef::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_views() {
        assert_eq!(Value::Float(0.25).as_float(), Some(0.25));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Bool(true).as_float(), Some(1.0));
        assert_eq!(Value::Vec2([1.0, 2.0]).as_float(), None);
        assert_eq!(Value::object_ref("Mat").as_float(), None);
    }

    #[test]
    fn tagged_serde_shape() {
        let v = Value::object_ref("Skin");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "ref");
        assert_eq!(json["data"], "Skin");
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }
}
