//! Animation clip model: float curves and object-reference curves bound by
//! `(relative path, component type, property)`.
//!
//! Setting a curve for a binding that already exists replaces it, which
//! keeps baked clips free of duplicate bindings when several property groups
//! touch the same target.

use dressing_api_core::AssetRef;
use serde::{Deserialize, Serialize};

/// Component type used for GameObject active-state curves.
pub const GAME_OBJECT_TYPE: &str = "GameObject";
/// Property animated on [`GAME_OBJECT_TYPE`] bindings.
pub const IS_ACTIVE_PROPERTY: &str = "m_IsActive";
/// Property animated on Behaviour bindings.
pub const ENABLED_PROPERTY: &str = "m_Enabled";
/// Component type carrying blendshape weights.
pub const SKINNED_MESH_RENDERER_TYPE: &str = "SkinnedMeshRenderer";
pub const BLENDSHAPE_PREFIX: &str = "blendShape.";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    /// Constant value between `t0` and `t1`; a single key when they coincide.
    pub fn constant(t0: f32, t1: f32, value: f32) -> Self {
        let mut keys = vec![Keyframe { time: t0, value }];
        if t1 != t0 {
            keys.push(Keyframe { time: t1, value });
        }
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self {
            keys: vec![
                Keyframe { time: t0, value: v0 },
                Keyframe { time: t1, value: v1 },
            ],
        }
    }

    /// Sample the curve, clamping outside the key range.
    pub fn evaluate(&self, t: f32) -> Option<f32> {
        let first = self.keys.first()?;
        if t <= first.time {
            return Some(first.value);
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return Some(b.value);
                }
                let u = (t - a.time) / span;
                return Some(a.value + (b.value - a.value) * u);
            }
        }
        self.keys.last().map(|k| k.value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurveBinding {
    pub path: String,
    pub type_name: String,
    pub property: String,
}

impl CurveBinding {
    pub fn new(
        path: impl Into<String>,
        type_name: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectReferenceKeyframe {
    pub time: f32,
    pub value: AssetRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatCurve {
    pub binding: CurveBinding,
    pub curve: AnimationCurve,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectReferenceCurve {
    pub binding: CurveBinding,
    pub keyframes: Vec<ObjectReferenceKeyframe>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub curves: Vec<FloatCurve>,
    pub object_curves: Vec<ObjectReferenceCurve>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn set_curve(&mut self, binding: CurveBinding, curve: AnimationCurve) {
        match self.curves.iter_mut().find(|c| c.binding == binding) {
            Some(existing) => existing.curve = curve,
            None => self.curves.push(FloatCurve { binding, curve }),
        }
    }

    pub fn set_object_curve(&mut self, binding: CurveBinding, keyframes: Vec<ObjectReferenceKeyframe>) {
        match self.object_curves.iter_mut().find(|c| c.binding == binding) {
            Some(existing) => existing.keyframes = keyframes,
            None => self.object_curves.push(ObjectReferenceCurve { binding, keyframes }),
        }
    }

    pub fn curve(&self, binding: &CurveBinding) -> Option<&AnimationCurve> {
        self.curves
            .iter()
            .find(|c| &c.binding == binding)
            .map(|c| &c.curve)
    }

    /// Look up a float curve by its binding parts.
    pub fn find_curve(&self, path: &str, type_name: &str, property: &str) -> Option<&AnimationCurve> {
        self.curves
            .iter()
            .find(|c| {
                c.binding.path == path
                    && c.binding.type_name == type_name
                    && c.binding.property == property
            })
            .map(|c| &c.curve)
    }

    pub fn find_object_curve(
        &self,
        path: &str,
        type_name: &str,
        property: &str,
    ) -> Option<&[ObjectReferenceKeyframe]> {
        self.object_curves
            .iter()
            .find(|c| {
                c.binding.path == path
                    && c.binding.type_name == type_name
                    && c.binding.property == property
            })
            .map(|c| c.keyframes.as_slice())
    }

    /// Every binding touched by this clip, float curves first.
    pub fn bindings(&self) -> impl Iterator<Item = &CurveBinding> {
        self.curves
            .iter()
            .map(|c| &c.binding)
            .chain(self.object_curves.iter().map(|c| &c.binding))
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len() + self.object_curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curve_count() == 0
    }
}
