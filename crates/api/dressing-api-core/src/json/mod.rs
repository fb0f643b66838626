//! JSON scene documents.
//!
//! A document is a nested object tree:
//! ```json
//! { "name": "Avatar", "children": [
//!   { "name": "Body", "components": [
//!     { "type": "SkinnedMeshRenderer", "blendshapes": { "Smile": 20 },
//!       "properties": { "m_CastShadows": 1 } } ] } ] }
//! ```
//! Property values accept shorthand forms which are normalized into the
//! canonical `{ "type": ..., "data": ... }` representation of [`Value`].

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use thiserror::Error;

use crate::component::{Blendshape, Component, ComponentKind, Material};
use crate::menu::{MenuItem, ParameterConfig};
use crate::scene::{ObjectId, Scene};
use crate::value::Value;

/// Errors produced while loading scene documents.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("scene json parse error: {0}")]
    SceneParse(String),
    #[error("invalid value for property '{property}' on {object}: {reason}")]
    InvalidValue {
        object: String,
        property: String,
        reason: String,
    },
    #[error("unknown parent object {0}")]
    UnknownParent(ObjectId),
}

#[derive(Debug, Deserialize)]
pub struct ObjectDoc {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
    #[serde(default)]
    pub children: Vec<ObjectDoc>,
    #[serde(default)]
    pub menu_item: Option<MenuItem>,
    #[serde(default)]
    pub parameter_configs: Vec<ParameterConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ComponentDoc {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub kind: ComponentKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
    #[serde(default)]
    pub blendshapes: Option<IndexMap<String, f32>>,
    #[serde(default)]
    pub materials: Vec<MaterialDoc>,
}

#[derive(Debug, Deserialize)]
pub struct MaterialDoc {
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
}

fn default_true() -> bool {
    true
}

/// Normalize shorthand `Value` JSON into the canonical tagged form.
///
/// Accepted aliases: numbers (float), booleans, strings (text),
/// numeric arrays of length 2/3/4 (vec2/vec3/vec4), and single-key objects
/// `{ "ref": name }`, `{ "int": n }`, `{ "color": [r, g, b, a] }`.
pub fn normalize_value_json(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Number(n) => json!({ "type": "float", "data": n }),
        JsonValue::Bool(b) => json!({ "type": "bool", "data": b }),
        JsonValue::String(s) => json!({ "type": "text", "data": s }),
        JsonValue::Array(arr) if arr.iter().all(|x| x.is_number()) => match arr.len() {
            2 => json!({ "type": "vec2", "data": arr }),
            3 => json!({ "type": "vec3", "data": arr }),
            4 => json!({ "type": "vec4", "data": arr }),
            _ => JsonValue::Array(arr),
        },
        JsonValue::Object(obj) => {
            if obj.contains_key("type") && obj.contains_key("data") {
                return JsonValue::Object(obj);
            }
            if let Some(name) = obj.get("ref").and_then(|x| x.as_str()) {
                return json!({ "type": "ref", "data": name });
            }
            if let Some(i) = obj.get("int").and_then(|x| x.as_i64()) {
                return json!({ "type": "int", "data": i });
            }
            if let Some(c) = obj.get("color") {
                return json!({ "type": "colorrgba", "data": c });
            }
            JsonValue::Object(obj)
        }
        other => other,
    }
}

/// Parse a single property value, accepting shorthand.
pub fn parse_value(raw: JsonValue) -> Result<Value, String> {
    serde_json::from_value(normalize_value_json(raw)).map_err(|e| e.to_string())
}

fn parse_properties(
    object: &str,
    raw: Map<String, JsonValue>,
) -> Result<IndexMap<String, Value>, JsonError> {
    let mut out = IndexMap::with_capacity(raw.len());
    for (property, v) in raw {
        let value = parse_value(v).map_err(|reason| JsonError::InvalidValue {
            object: object.to_string(),
            property: property.clone(),
            reason,
        })?;
        out.insert(property, value);
    }
    Ok(out)
}

fn build_component(object: &str, doc: ComponentDoc) -> Result<Component, JsonError> {
    let mut materials = Vec::with_capacity(doc.materials.len());
    for m in doc.materials {
        materials.push(Material {
            properties: parse_properties(object, m.properties)?,
            name: m.name,
        });
    }
    Ok(Component {
        kind: doc.kind,
        enabled: doc.enabled,
        properties: parse_properties(object, doc.properties)?,
        blendshapes: doc.blendshapes.map(|shapes| {
            shapes
                .into_iter()
                .map(|(name, weight)| Blendshape { name, weight })
                .collect()
        }),
        materials,
        type_name: doc.type_name,
    })
}

/// Instantiate `doc` (and its subtree) under `parent` in an existing scene.
pub fn append_object(
    scene: &mut Scene,
    parent: Option<ObjectId>,
    doc: ObjectDoc,
) -> Result<ObjectId, JsonError> {
    if let Some(p) = parent {
        if scene.object(p).is_none() {
            return Err(JsonError::UnknownParent(p));
        }
    }
    let id = scene.create_object(doc.name.clone(), parent);
    let mut components = Vec::with_capacity(doc.components.len());
    for c in doc.components {
        components.push(build_component(&doc.name, c)?);
    }
    if let Some(o) = scene.object_mut(id) {
        o.active = doc.active;
        o.menu_item = doc.menu_item;
        o.parameter_configs = doc.parameter_configs;
        for c in components {
            if c.kind == ComponentKind::Transform {
                // the object already owns its Transform; merge authored properties
                o.components[0].properties.extend(c.properties);
            } else {
                o.components.push(c);
            }
        }
    }
    for child in doc.children {
        append_object(scene, Some(id), child)?;
    }
    Ok(id)
}

/// Parse a scene document, returning the scene and its root object.
pub fn parse_scene(text: &str) -> Result<(Scene, ObjectId), JsonError> {
    let doc: ObjectDoc =
        serde_json::from_str(text).map_err(|e| JsonError::SceneParse(e.to_string()))?;
    let mut scene = Scene::new();
    let root = append_object(&mut scene, None, doc)?;
    Ok((scene, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_shorthand() {
        assert_eq!(parse_value(json!(1.5)).unwrap(), Value::Float(1.5));
        assert_eq!(parse_value(json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(parse_value(json!({ "ref": "Mat" })).unwrap(), Value::object_ref("Mat"));
        assert_eq!(parse_value(json!({ "int": 4 })).unwrap(), Value::Int(4));
        assert_eq!(parse_value(json!([1, 2, 3])).unwrap(), Value::Vec3([1.0, 2.0, 3.0]));
        assert!(parse_value(json!([1, 2, 3, 4, 5])).is_err());
    }

    #[test]
    fn builds_scene_tree() {
        let text = r#"{
            "name": "Avatar",
            "children": [
                { "name": "Body", "active": false, "components": [
                    { "type": "SkinnedMeshRenderer", "blendshapes": { "Smile": 20 },
                      "materials": [ { "name": "Skin", "properties": { "_Glossiness": 0.2 } } ] }
                ] },
                { "name": "Armature", "children": [ { "name": "Hips" } ] }
            ]
        }"#;
        let (scene, root) = parse_scene(text).unwrap();
        let body = scene.find(root, "Body").unwrap();
        assert!(!scene.is_active_self(body));
        let r = scene.find_mesh_renderer(body).unwrap();
        let renderer = scene.component(r).unwrap();
        assert_eq!(renderer.property("blendShape.Smile"), Some(Value::Float(20.0)));
        assert_eq!(renderer.property("material._Glossiness"), Some(Value::Float(0.2)));
        assert!(scene.find(root, "Armature/Hips").is_some());
    }

    #[test]
    fn reports_bad_property_values() {
        let text = r#"{ "name": "A", "components": [
            { "type": "X", "properties": { "bad": [1, "x"] } } ] }"#;
        let err = parse_scene(text).unwrap_err();
        assert!(matches!(err, JsonError::InvalidValue { ref property, .. } if property == "bad"));
    }
}
