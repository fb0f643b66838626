//! Wear/unwear clips for wearables stored in a cabinet.
//!
//! Configured paths are the ones recorded when the wearable was set up.
//! They go through the [`PathRemapper`] first, so objects moved since then
//! (bones merged into the avatar armature, dynamics grouped elsewhere) are
//! still found and animated at their current path.

use dressing_api_core::{ComponentRef, ObjectId, Scene};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::clip::{AnimationClip, AnimationCurve, SKINNED_MESH_RENDERER_TYPE};
use crate::error::{ComposeError, Result};
use crate::fluent::{ClipBuilder, PathResolver};
use crate::remap::PathRemapper;
use crate::report::Report;

pub(crate) const LOG_LABEL: &str = "CabinetAnimGenerator";

/// Component types treated as physics dynamics.
pub const DYNAMICS_TYPES: &[&str] = &["DynamicBone", "VRCPhysBone"];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    pub path: String,
    pub state: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendshapeValue {
    pub path: String,
    pub blendshape_name: String,
    pub value: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationPreset {
    pub toggles: Vec<Toggle>,
    pub blendshapes: Vec<BlendshapeValue>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomizableType {
    #[default]
    Toggle,
    Blendshape,
}

/// A user-adjustable option of a wearable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customizable {
    pub name: String,
    #[serde(rename = "type")]
    pub customizable_type: CustomizableType,
    pub avatar_toggles: Vec<Toggle>,
    pub avatar_blendshapes: Vec<BlendshapeValue>,
    pub wearable_toggles: Vec<Toggle>,
    pub wearable_blendshapes: Vec<BlendshapeValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetAnimConfig {
    pub avatar_animation_on_wear: AnimationPreset,
    pub wearable_animation_on_wear: AnimationPreset,
    pub wearable_customizables: Vec<Customizable>,
}

impl CabinetAnimConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn customizable(&self, name: &str) -> Option<&Customizable> {
        self.wearable_customizables.iter().find(|c| c.name == name)
    }
}

/// A dynamics component found under some root.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicsRef {
    pub component: ComponentRef,
    pub type_name: String,
}

/// Dynamics components under `root`, root included, in scene order. An
/// object carrying several of them is listed once, by its first.
pub fn scan_dynamics(scene: &Scene, root: ObjectId) -> Vec<DynamicsRef> {
    let mut found = Vec::new();
    for obj in scene.descendants(root, true) {
        let Some(o) = scene.object(obj) else {
            continue;
        };
        let first = o
            .components
            .iter()
            .enumerate()
            .find(|(_, c)| DYNAMICS_TYPES.contains(&c.type_name.as_str()));
        if let Some((index, component)) = first {
            found.push(DynamicsRef {
                component: ComponentRef::new(obj, index),
                type_name: component.type_name.clone(),
            });
        }
    }
    found
}

/// Key for a customizable's result. A name already taken gets the next
/// free `_n` suffix and a warning, so no clip is dropped.
fn result_key<V>(report: &mut Report, taken: &IndexMap<String, V>, name: &str) -> String {
    if !taken.contains_key(name) {
        return name.to_string();
    }
    let mut n = 1u32;
    let mut key = format!("{name}_{n}");
    while taken.contains_key(&key) {
        n = n.wrapping_add(1);
        key = format!("{name}_{n}");
    }
    report.log_warn(
        LOG_LABEL,
        format!("Duplicate customizable name {name}, its clips are keyed as {key}"),
    );
    key
}

pub struct CabinetAnimGenerator<'a> {
    scene: &'a Scene,
    avatar: ObjectId,
    wearable: ObjectId,
    config: &'a CabinetAnimConfig,
    wearable_dynamics: Vec<DynamicsRef>,
    remapper: &'a PathRemapper,
    /// Curves are written at current paths, so they bypass remapping.
    identity: PathRemapper,
    write_defaults: bool,
}

impl<'a> CabinetAnimGenerator<'a> {
    pub fn new(
        scene: &'a Scene,
        avatar: ObjectId,
        wearable: ObjectId,
        config: &'a CabinetAnimConfig,
        wearable_dynamics: Vec<DynamicsRef>,
        remapper: &'a PathRemapper,
        write_defaults: bool,
    ) -> Self {
        Self {
            scene,
            avatar,
            wearable,
            config,
            wearable_dynamics,
            remapper,
            identity: PathRemapper::identity(avatar),
            write_defaults,
        }
    }

    fn resolver(&self) -> PathResolver<'_> {
        PathResolver::new(self.scene, self.avatar, &self.identity)
    }

    fn object_name(&self, obj: ObjectId) -> &str {
        self.scene.name(obj).unwrap_or("<unknown>")
    }

    fn ensure_wearable_inside_avatar(&self) -> Result<()> {
        if self.scene.is_descendant(self.avatar, self.wearable) {
            Ok(())
        } else {
            Err(ComposeError::NotInsideAvatar {
                object: self.object_name(self.wearable).to_string(),
                avatar: self.object_name(self.avatar).to_string(),
            })
        }
    }

    fn remapped_avatar_object(&self, path: &str) -> Option<ObjectId> {
        self.scene
            .find(self.avatar, &self.remapper.remap(self.scene, path))
    }

    fn remapped_wearable_object(&self, path: &str) -> Option<ObjectId> {
        let base = self.scene.relative_path(self.wearable, self.avatar)?;
        let full = format!("{base}/{path}");
        self.scene
            .find(self.avatar, &self.remapper.remap(self.scene, &full))
    }

    /// Current weight of `blendshape` on the object's skinned mesh, with a
    /// warning for whichever link of the chain is missing.
    fn blendshape_value(&self, report: &mut Report, obj: ObjectId, blendshape: &str) -> Option<(ComponentRef, f32)> {
        let name = self.object_name(obj);
        let Some(renderer) = self.scene.find_component(obj, SKINNED_MESH_RENDERER_TYPE) else {
            report.log_warn(
                LOG_LABEL,
                format!("Ignored {name}: no skinned mesh renderer attached"),
            );
            return None;
        };
        let component = self.scene.component(renderer)?;
        if !component.has_mesh() {
            report.log_warn(LOG_LABEL, format!("Ignored {name}: renderer has no mesh"));
            return None;
        }
        let Some(weight) = component.blendshape_weight(blendshape) else {
            report.log_warn(
                LOG_LABEL,
                format!("Ignored {name}: mesh has no blendshape {blendshape}"),
            );
            return None;
        };
        Some((renderer, weight))
    }

    fn toggles(
        &self,
        report: &mut Report,
        enable: &mut ClipBuilder<'_>,
        disable: &mut ClipBuilder<'_>,
        toggles: &[Toggle],
        on_wearable: bool,
    ) {
        for toggle in toggles {
            let found = if on_wearable {
                self.remapped_wearable_object(&toggle.path)
            } else {
                self.remapped_avatar_object(&toggle.path)
            };
            let Some(obj) = found else {
                let side = if on_wearable { "wearable" } else { "avatar" };
                report.log_warn(
                    LOG_LABEL,
                    format!("Ignored {side} toggle, object not found: {}", toggle.path),
                );
                continue;
            };
            enable.toggle_object(obj, toggle.state);
            if !self.write_defaults {
                disable.toggle_object(obj, self.scene.is_active_self(obj));
            }
        }
    }

    fn blendshapes(
        &self,
        report: &mut Report,
        enable: &mut ClipBuilder<'_>,
        disable: &mut ClipBuilder<'_>,
        blendshapes: &[BlendshapeValue],
        on_wearable: bool,
    ) {
        let side = if on_wearable { "wearable" } else { "avatar" };
        for blendshape in blendshapes {
            let found = if on_wearable {
                self.remapped_wearable_object(&blendshape.path)
            } else {
                self.remapped_avatar_object(&blendshape.path)
            };
            let Some(obj) = found else {
                report.log_warn(
                    LOG_LABEL,
                    format!("Ignored {side} blendshape, object not found: {}", blendshape.path),
                );
                continue;
            };
            let Some((renderer, original)) = self.blendshape_value(report, obj, &blendshape.blendshape_name) else {
                report.log_warn(
                    LOG_LABEL,
                    format!(
                        "Ignored {side} blendshape, could not obtain original value: {}",
                        blendshape.path
                    ),
                );
                continue;
            };
            enable.blendshape(renderer, &blendshape.blendshape_name, blendshape.value);
            if !self.write_defaults {
                disable.blendshape(renderer, &blendshape.blendshape_name, original);
            }
        }
    }

    fn dynamics(&self, enable: &mut ClipBuilder<'_>, disable: &mut ClipBuilder<'_>) -> Result<()> {
        let mut visited = Vec::new();
        for dynamics in &self.wearable_dynamics {
            let obj = dynamics.component.object;
            if !self.scene.is_descendant(self.avatar, obj) {
                return Err(ComposeError::DynamicsOutsideAvatar {
                    object: self.object_name(obj).to_string(),
                    avatar: self.object_name(self.avatar).to_string(),
                });
            }
            if visited.contains(&obj) {
                continue;
            }
            visited.push(obj);
            enable.toggle(dynamics.component, true);
            if !self.write_defaults {
                disable.toggle(dynamics.component, false);
            }
        }
        Ok(())
    }

    fn clip_pair(&self, suffix: &str) -> (ClipBuilder<'_>, ClipBuilder<'_>) {
        let name = self.object_name(self.wearable);
        (
            ClipBuilder::new(self.resolver(), AnimationClip::new(format!("{name}_{suffix}_Enable"))),
            ClipBuilder::new(self.resolver(), AnimationClip::new(format!("{name}_{suffix}_Disable"))),
        )
    }

    /// `(enable, disable)` clips for wearing the wearable. With write
    /// defaults on, the disable clip stays empty.
    pub fn generate_wear_animations(&self, report: &mut Report) -> Result<(AnimationClip, AnimationClip)> {
        self.ensure_wearable_inside_avatar()?;
        let (mut enable, mut disable) = self.clip_pair("Wear");
        let config = self.config;

        self.toggles(report, &mut enable, &mut disable, &config.avatar_animation_on_wear.toggles, false);
        self.toggles(report, &mut enable, &mut disable, &config.wearable_animation_on_wear.toggles, true);
        self.dynamics(&mut enable, &mut disable)?;
        self.blendshapes(report, &mut enable, &mut disable, &config.avatar_animation_on_wear.blendshapes, false);
        self.blendshapes(report, &mut enable, &mut disable, &config.wearable_animation_on_wear.blendshapes, true);

        Ok((enable.build(), disable.build()))
    }

    /// `(enable, disable)` clips per customizable, keyed by name. Wearable
    /// toggles and blendshapes only apply to toggle customizables.
    pub fn generate_customizable_toggle_animations(
        &self,
        report: &mut Report,
    ) -> Result<IndexMap<String, (AnimationClip, AnimationClip)>> {
        self.ensure_wearable_inside_avatar()?;
        let mut out = IndexMap::new();
        for customizable in &self.config.wearable_customizables {
            let (mut enable, mut disable) = self.clip_pair(&customizable.name);
            self.toggles(report, &mut enable, &mut disable, &customizable.avatar_toggles, false);
            self.blendshapes(report, &mut enable, &mut disable, &customizable.avatar_blendshapes, false);
            if customizable.customizable_type == CustomizableType::Toggle {
                self.blendshapes(report, &mut enable, &mut disable, &customizable.wearable_blendshapes, true);
                self.toggles(report, &mut enable, &mut disable, &customizable.wearable_toggles, true);
            }
            let key = result_key(report, &out, &customizable.name);
            out.insert(key, (enable.build(), disable.build()));
        }
        Ok(out)
    }

    /// One clip per blendshape customizable, sweeping each wearable
    /// blendshape from 0 to 100 over normalized time.
    pub fn generate_customizable_blendshape_animations(
        &self,
        report: &mut Report,
    ) -> Result<IndexMap<String, AnimationClip>> {
        self.ensure_wearable_inside_avatar()?;
        let mut out = IndexMap::new();
        let wearable_name = self.object_name(self.wearable);
        for customizable in &self.config.wearable_customizables {
            if customizable.customizable_type != CustomizableType::Blendshape {
                continue;
            }
            let mut clip = ClipBuilder::new(
                self.resolver(),
                AnimationClip::new(format!("{wearable_name}_{}_Blendshape", customizable.name)),
            );
            for blendshape in &customizable.wearable_blendshapes {
                let Some(obj) = self.scene.find(self.wearable, &blendshape.path) else {
                    report.log_warn(
                        LOG_LABEL,
                        format!(
                            "Ignored wearable blendshape, object not found in {wearable_name}: {}",
                            blendshape.path
                        ),
                    );
                    continue;
                };
                clip.set_object_curve(
                    obj,
                    SKINNED_MESH_RENDERER_TYPE,
                    &format!("blendShape.{}", blendshape.blendshape_name),
                    AnimationCurve::linear(0.0, 0.0, 1.0, 100.0),
                );
            }
            let key = result_key(report, &out, &customizable.name);
            out.insert(key, clip.build());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dressing_api_core::{Component, ComponentKind};

    #[test]
    fn scan_lists_each_dynamics_object_once() {
        let mut s = Scene::new();
        let root = s.create_object("Wearable", None);
        let bone = s.create_object("Bone", Some(root));
        s.add_component(bone, Component::new("DynamicBone", ComponentKind::Behaviour));
        s.add_component(bone, Component::new("VRCPhysBone", ComponentKind::Behaviour));
        s.add_component(root, Component::new("Animator", ComponentKind::Behaviour));
        let found = scan_dynamics(&s, root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].component.object, bone);
        assert_eq!(found[0].type_name, "DynamicBone");
    }

    #[test]
    fn duplicate_customizable_names_keep_both_results() {
        let mut s = Scene::new();
        let avatar = s.create_object("Avatar", None);
        let wearable = s.create_object("Wearable", Some(avatar));
        s.create_object("A", Some(avatar));
        s.create_object("B", Some(avatar));
        let customizable = |path: &str| Customizable {
            name: "Sleeves".into(),
            avatar_toggles: vec![Toggle {
                path: path.into(),
                state: true,
            }],
            ..Default::default()
        };
        let config = CabinetAnimConfig {
            wearable_customizables: vec![customizable("A"), customizable("B")],
            ..Default::default()
        };
        let remapper = PathRemapper::new(&s, avatar);
        let generator = CabinetAnimGenerator::new(&s, avatar, wearable, &config, Vec::new(), &remapper, true);
        let mut report = Report::new();
        let clips = generator.generate_customizable_toggle_animations(&mut report).unwrap();

        assert_eq!(clips.len(), 2);
        assert!(clips["Sleeves"].0.find_curve("A", "GameObject", "m_IsActive").is_some());
        assert!(clips["Sleeves_1"].0.find_curve("B", "GameObject", "m_IsActive").is_some());
        assert_eq!(report.entries().len(), 1);
        assert_eq!(report.entries()[0].level, crate::report::LogLevel::Warning);
    }

    #[test]
    fn wearable_outside_avatar_is_rejected() {
        let mut s = Scene::new();
        let avatar = s.create_object("Avatar", None);
        let wearable = s.create_object("Wearable", None);
        let config = CabinetAnimConfig::default();
        let remapper = PathRemapper::new(&s, avatar);
        let generator = CabinetAnimGenerator::new(&s, avatar, wearable, &config, Vec::new(), &remapper, true);
        let mut report = Report::new();
        let err = generator.generate_wear_animations(&mut report).unwrap_err();
        assert!(matches!(err, ComposeError::NotInsideAvatar { .. }));
        assert!(generator.generate_customizable_toggle_animations(&mut report).is_err());
        assert!(generator.generate_customizable_blendshape_animations(&mut report).is_err());
    }

    #[test]
    fn missing_blendshape_is_warned_and_skipped() {
        let mut s = Scene::new();
        let avatar = s.create_object("Avatar", None);
        let wearable = s.create_object("Wearable", Some(avatar));
        let body = s.create_object("Body", Some(avatar));
        s.add_component(
            body,
            Component::new(SKINNED_MESH_RENDERER_TYPE, ComponentKind::Behaviour).with_blendshape("Smile", 10.0),
        );
        let config = CabinetAnimConfig {
            avatar_animation_on_wear: AnimationPreset {
                blendshapes: vec![BlendshapeValue {
                    path: "Body".into(),
                    blendshape_name: "Frown".into(),
                    value: 50.0,
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let remapper = PathRemapper::new(&s, avatar);
        let generator = CabinetAnimGenerator::new(&s, avatar, wearable, &config, Vec::new(), &remapper, false);
        let mut report = Report::new();
        let (enable, disable) = generator.generate_wear_animations(&mut report).unwrap();
        assert!(enable.is_empty() && disable.is_empty());
        assert_eq!(report.entries().len(), 2);
    }
}
