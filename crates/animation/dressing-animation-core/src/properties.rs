//! Target selection and curve baking shared by every control kind.
//!
//! Baking samples the live scene: restore curves hold the value each
//! property has right now, before any generated animation applies.

use dressing_api_core::{ComponentKind, ComponentRef, ObjectId, Scene, Value};
use hashbrown::HashSet;

use crate::clip::{AnimationCurve, ObjectReferenceKeyframe};
use crate::control::{PropertyGroup, SelectionType, SmartControl};
use crate::fluent::ClipBuilder;

/// Objects a property group applies to, in scene order.
pub fn select_objects(scene: &Scene, avatar: ObjectId, group: &PropertyGroup) -> Vec<ObjectId> {
    let listed: HashSet<ObjectId> = group.objects.iter().copied().collect();
    match group.selection {
        SelectionType::Normal => {
            let mut seen = HashSet::new();
            group
                .objects
                .iter()
                .copied()
                .filter(|o| scene.object(*o).is_some() && seen.insert(*o))
                .collect()
        }
        SelectionType::Inverted => match group.search_root {
            Some(root) => scene
                .descendants(root, true)
                .into_iter()
                .filter(|o| !listed.contains(o))
                .collect(),
            None => Vec::new(),
        },
        SelectionType::AvatarWide => scene
            .descendants(avatar, true)
            .into_iter()
            .filter(|o| !listed.contains(o))
            .collect(),
    }
}

/// Current on/off state of a toggle target: activeSelf for a Transform,
/// `enabled` for a Behaviour. Other components have no such state and
/// read as off.
pub fn original_toggle_state(scene: &Scene, target: ComponentRef) -> bool {
    let Some(component) = scene.component(target) else {
        return false;
    };
    match component.kind {
        ComponentKind::Transform => scene.is_active_self(target.object),
        ComponentKind::Behaviour => component.enabled,
        ComponentKind::Other => {
            log::warn!(
                "Unsupported component {} on {}, defaulting original value as false",
                component.type_name,
                scene.name(target.object).unwrap_or("<unknown>")
            );
            false
        }
    }
}

/// Bake a binary control: enabled values into `enabled`, pre-control
/// values into `restore` unless write defaults handles restoration.
pub fn bake_binary(
    scene: &Scene,
    avatar: ObjectId,
    write_defaults: bool,
    ctrl: &SmartControl,
    enabled: &mut ClipBuilder<'_>,
    restore: &mut ClipBuilder<'_>,
) {
    for toggle in &ctrl.object_toggles {
        if scene.component(toggle.target).is_none() {
            continue;
        }
        enabled.toggle(toggle.target, toggle.enabled);
        if !write_defaults {
            restore.toggle(toggle.target, original_toggle_state(scene, toggle.target));
        }
    }

    for group in &ctrl.property_groups {
        for obj in select_objects(scene, avatar, group) {
            let Some(o) = scene.object(obj) else {
                continue;
            };
            for component in &o.components {
                for pv in &group.values {
                    let Some(original) = component.property(&pv.name) else {
                        continue;
                    };
                    match (&pv.value_object_reference, original) {
                        (Some(reference), Value::ObjectRef(current)) => {
                            enabled.set_object_reference_curve_on(
                                obj,
                                &component.type_name,
                                &pv.name,
                                vec![ObjectReferenceKeyframe {
                                    time: 0.0,
                                    value: reference.clone(),
                                }],
                            );
                            if !write_defaults {
                                restore.set_object_reference_curve_on(
                                    obj,
                                    &component.type_name,
                                    &pv.name,
                                    vec![ObjectReferenceKeyframe {
                                        time: 0.0,
                                        value: current,
                                    }],
                                );
                            }
                        }
                        (_, Value::Float(current)) => {
                            enabled.set_object_curve(
                                obj,
                                &component.type_name,
                                &pv.name,
                                AnimationCurve::constant(0.0, 0.0, pv.value),
                            );
                            if !write_defaults {
                                restore.set_object_curve(
                                    obj,
                                    &component.type_name,
                                    &pv.name,
                                    AnimationCurve::constant(0.0, 0.0, current),
                                );
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Bake a motion-time control: one linear 0..1 curve per float property.
/// When `restore` is given, it receives the pre-control values.
pub fn bake_motion_time(
    scene: &Scene,
    avatar: ObjectId,
    ctrl: &SmartControl,
    clip: &mut ClipBuilder<'_>,
    mut restore: Option<&mut ClipBuilder<'_>>,
) {
    for group in &ctrl.property_groups {
        for obj in select_objects(scene, avatar, group) {
            let Some(o) = scene.object(obj) else {
                continue;
            };
            for component in &o.components {
                for pv in &group.values {
                    let Some(Value::Float(current)) = component.property(&pv.name) else {
                        continue;
                    };
                    clip.set_object_curve(
                        obj,
                        &component.type_name,
                        &pv.name,
                        AnimationCurve::linear(0.0, pv.from_value, 1.0, pv.to_value),
                    );
                    if let Some(r) = restore.as_deref_mut() {
                        r.set_object_curve(
                            obj,
                            &component.type_name,
                            &pv.name,
                            AnimationCurve::constant(0.0, 0.0, current),
                        );
                    }
                }
            }
        }
    }
}
