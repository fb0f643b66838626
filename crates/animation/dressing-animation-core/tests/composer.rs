use anyhow::Result;
use dressing_animation_core::{
    clip::{GAME_OBJECT_TYPE, IS_ACTIVE_PROPERTY},
    composer::{DISABLED_STATE, ENABLED_STATE, MOTION_TIME_STATE, PREPARE_DISABLED_STATE},
    control::{PhysBoneCondition, PhysBoneSource, PropertyGroup},
    controller::{AnimatorControllerLayer, AnimatorState, ConditionMode, StateBehaviour},
    AnimatorController, AnimatorOptions, ComposeError, Context, ControlId, LogLevel, ObjectId,
    ParameterSlot, ParameterType, PathRemapper, Scene, SlotId, SmartControl, SmartControlComposer,
    Value,
};
use dressing_api_core::{ComponentRef, MenuItemType};
use dressing_test_fixtures::scenes;

fn avatar() -> (Scene, ObjectId) {
    scenes::load("composer-avatar").expect("composer avatar fixture")
}

fn object(scene: &Scene, root: ObjectId, path: &str) -> ObjectId {
    scene
        .find(root, path)
        .unwrap_or_else(|| panic!("missing {path}"))
}

/// Run one full compose/finish pass over `controls`.
fn compose_pass(
    scene: &mut Scene,
    root: ObjectId,
    write_defaults: bool,
    slots: Vec<ParameterSlot>,
    controls: &mut [SmartControl],
) -> Result<(AnimatorController, Context)> {
    let options = AnimatorOptions::new(root).with_write_defaults(write_defaults);
    let mut controller = AnimatorController::new("FX");
    let mut ctx = Context::new(root);
    let mut composer = SmartControlComposer::new(&options, &mut controller);
    for slot in slots {
        composer.add_slot(slot);
    }
    for ctrl in controls.iter_mut() {
        composer.compose(&mut ctx, scene, ctrl)?;
    }
    composer.finish(&mut ctx, scene)?;
    Ok((controller, ctx))
}

fn state<'a>(layer: &'a AnimatorControllerLayer, name: &str) -> &'a AnimatorState {
    let m = &layer.state_machine;
    let id = m
        .find_state(name)
        .unwrap_or_else(|| panic!("missing state {name}"));
    &m.states[id.0]
}

fn hat_toggle(scene: &Scene, root: ObjectId) -> SmartControl {
    let hat = object(scene, root, "Hat");
    SmartControl::new(ControlId(0), hat)
        .with_name("Hat")
        .toggle(ComponentRef::transform(hat), true)
}

fn smile_control(scene: &Scene, root: ObjectId) -> SmartControl {
    let body = object(scene, root, "Body");
    let lamp = object(scene, root, "Lamp");
    let light = scene.find_component(lamp, "Light").expect("light");
    SmartControl::new(ControlId(1), body)
        .with_name("Smile")
        .toggle(light, true)
        .add_property_group(
            PropertyGroup::new()
                .with_selected_objects([body])
                .change_property("blendShape.Smile", 100.0),
        )
}

#[test]
fn binary_toggle_generates_parameter_layer_and_config() -> Result<()> {
    let (mut scene, root) = avatar();
    let mut controls = [hat_toggle(&scene, root)];
    let (ac, _) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    assert_eq!(controls[0].animator_config.parameter_name.as_deref(), Some("Hat"));
    let param = ac.parameter("Hat").expect("Hat parameter");
    assert_eq!(param.parameter_type, ParameterType::Bool);

    let layer = ac.layer("Hat").expect("Hat layer");
    let names: Vec<&str> = layer
        .state_machine
        .states
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec![DISABLED_STATE, ENABLED_STATE, PREPARE_DISABLED_STATE]);

    let on = state(layer, ENABLED_STATE).motion.as_ref().expect("enabled clip");
    let curve = on.find_curve("Hat", GAME_OBJECT_TYPE, IS_ACTIVE_PROPERTY).expect("hat curve");
    assert_eq!(curve.evaluate(0.0), Some(1.0));
    let restore = state(layer, PREPARE_DISABLED_STATE)
        .motion
        .as_ref()
        .expect("restore clip");
    let curve = restore
        .find_curve("Hat", GAME_OBJECT_TYPE, IS_ACTIVE_PROPERTY)
        .expect("hat restore curve");
    assert_eq!(curve.evaluate(0.0), Some(0.0));

    let hat = object(&scene, root, "Hat");
    let configs = &scene.object(hat).unwrap().parameter_configs;
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].parameter_name, "Hat");
    Ok(())
}

#[test]
fn composing_twice_is_a_no_op() -> Result<()> {
    let (mut scene, root) = avatar();
    let options = AnimatorOptions::new(root);
    let mut ac = AnimatorController::new("FX");
    let mut ctx = Context::new(root);
    let mut ctrl = hat_toggle(&scene, root);
    let mut composer = SmartControlComposer::new(&options, &mut ac);
    composer.compose(&mut ctx, &mut scene, &mut ctrl)?;
    composer.compose(&mut ctx, &mut scene, &mut ctrl)?;
    assert!(composer.is_composed(ctrl.id));
    composer.finish(&mut ctx, &mut scene)?;

    assert_eq!(ac.layers.len(), 1);
    assert_eq!(ac.parameters.len(), 1);
    Ok(())
}

#[test]
fn write_defaults_off_restores_every_touched_binding() -> Result<()> {
    let (mut scene, root) = avatar();
    let mut controls = [smile_control(&scene, root)];
    let (ac, _) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    let layer = ac.layer("Smile").expect("layer");
    let on = state(layer, ENABLED_STATE).motion.as_ref().unwrap();
    let restore = state(layer, PREPARE_DISABLED_STATE).motion.as_ref().unwrap();
    assert_eq!(on.curve_count(), 2);
    for binding in on.bindings() {
        assert!(restore.curve(binding).is_some(), "no restore curve for {binding:?}");
    }
    let smile = restore
        .find_curve("Body", "SkinnedMeshRenderer", "blendShape.Smile")
        .unwrap();
    assert_eq!(smile.evaluate(0.0), Some(0.0));
    let light = restore.find_curve("Lamp", "Light", "m_Enabled").unwrap();
    assert_eq!(light.evaluate(0.0), Some(0.0));
    let light_on = on.find_curve("Lamp", "Light", "m_Enabled").unwrap();
    assert_eq!(light_on.evaluate(0.0), Some(1.0));
    Ok(())
}

#[test]
fn write_defaults_on_leaves_disabled_empty() -> Result<()> {
    let (mut scene, root) = avatar();
    let mut controls = [smile_control(&scene, root)];
    let (ac, _) = compose_pass(&mut scene, root, true, Vec::new(), &mut controls)?;

    let layer = ac.layer("Smile").expect("layer");
    assert!(layer.state_machine.find_state(PREPARE_DISABLED_STATE).is_none());
    assert!(state(layer, DISABLED_STATE).motion.as_ref().unwrap().is_empty());
    assert!(layer.state_machine.states.iter().all(|s| s.write_default_values));
    Ok(())
}

#[test]
fn every_transition_has_the_canonical_shape() -> Result<()> {
    let (mut scene, root) = avatar();
    let outfits = object(&scene, root, "Outfits");
    let mut controls = vec![hat_toggle(&scene, root), smile_control(&scene, root)];
    for (i, name) in ["Casual", "Formal"].into_iter().enumerate() {
        let o = object(&scene, root, &format!("Outfits/{name}"));
        controls.push(
            SmartControl::new(ControlId(10 + i as u32), o)
                .with_name(name)
                .with_parameter_slot(SlotId(0), i as i32)
                .toggle(ComponentRef::transform(o), true),
        );
    }
    let slot = ParameterSlot::new(SlotId(0), outfits, "Outfit");
    let (ac, _) = compose_pass(&mut scene, root, false, vec![slot], &mut controls)?;

    assert_eq!(ac.layers.len(), 3);
    for layer in &ac.layers {
        for s in &layer.state_machine.states {
            for t in &s.transitions {
                assert!(!t.has_exit_time);
                assert_eq!(t.exit_time, 0.0);
                assert_eq!(t.duration, 0.0);
                assert!(t.has_fixed_duration);
                assert!(!t.can_transition_to_self);
            }
        }
    }
    Ok(())
}

#[test]
fn parameter_slot_members_are_mutually_exclusive() -> Result<()> {
    let (mut scene, root) = avatar();
    let outfits = object(&scene, root, "Outfits");
    let mut controls: Vec<SmartControl> = ["Casual", "Formal", "Sporty"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let o = object(&scene, root, &format!("Outfits/{name}"));
            SmartControl::new(ControlId(i as u32), o)
                .with_name(name)
                .with_parameter_slot(SlotId(3), i as i32)
                .with_slot_menu_item(MenuItemType::Toggle)
                .toggle(ComponentRef::transform(o), true)
        })
        .collect();
    let slot = ParameterSlot::new(SlotId(3), outfits, "Outfit");
    let (ac, ctx) = compose_pass(&mut scene, root, false, vec![slot], &mut controls)?;
    assert!(!ctx.report.has_log_type(LogLevel::Error));

    assert_eq!(ac.parameter("Outfit").unwrap().parameter_type, ParameterType::Int);
    assert_eq!(ac.layers.len(), 1);
    let layer = ac.layer("Outfit").expect("slot layer");
    let m = &layer.state_machine;
    assert_eq!(m.default_state, m.find_state(DISABLED_STATE));

    assert_eq!(m.entry_transitions.len(), 3);
    for (value, t) in m.entry_transitions.iter().enumerate() {
        assert_eq!(t.conditions.len(), 1);
        assert_eq!(t.conditions[0].mode, ConditionMode::Equals);
        assert_eq!(t.conditions[0].parameter, "Outfit");
        assert_eq!(t.conditions[0].threshold, value as f32);
    }

    let formal_enabled = state(layer, "Formal Enabled");
    assert_eq!(formal_enabled.transitions.len(), 1);
    assert_eq!(formal_enabled.transitions[0].conditions[0].mode, ConditionMode::NotEqual);

    let prepare = state(layer, "Formal Prepare Disabled");
    assert_eq!(prepare.transitions.len(), 3);
    let (others, last) = prepare.transitions.split_at(2);
    assert_eq!(
        others
            .iter()
            .map(|t| (t.conditions[0].mode, t.conditions[0].threshold))
            .collect::<Vec<_>>(),
        vec![(ConditionMode::Equals, 0.0), (ConditionMode::Equals, 2.0)]
    );
    assert_eq!(last[0].conditions[0].mode, ConditionMode::NotEqual);
    assert_eq!(last[0].conditions[0].threshold, 1.0);
    assert_eq!(last[0].destination, m.find_state(DISABLED_STATE).unwrap());

    assert_eq!(controls[1].animator_config.parameter_name.as_deref(), Some("Outfit"));
    let formal = object(&scene, root, "Outfits/Formal");
    let item = scene.object(formal).unwrap().menu_item.as_ref().expect("menu item");
    assert_eq!(item.controller.parameter_name, "Outfit");
    assert_eq!(item.controller.parameter_value, 1.0);
    let configs = &scene.object(outfits).unwrap().parameter_configs;
    assert_eq!(configs[0].parameter_name, "Outfit");
    Ok(())
}

#[test]
fn duplicate_slot_value_is_reported_and_excluded() -> Result<()> {
    let (mut scene, root) = avatar();
    let outfits = object(&scene, root, "Outfits");
    let casual = object(&scene, root, "Outfits/Casual");
    let formal = object(&scene, root, "Outfits/Formal");
    let mut controls = [
        SmartControl::new(ControlId(0), casual)
            .with_name("Casual")
            .with_parameter_slot(SlotId(0), 1),
        SmartControl::new(ControlId(1), formal)
            .with_name("Formal")
            .with_parameter_slot(SlotId(0), 1),
    ];
    let slot = ParameterSlot::new(SlotId(0), outfits, "Outfit");
    let (ac, ctx) = compose_pass(&mut scene, root, false, vec![slot], &mut controls)?;

    assert!(ctx.report.has_log_type(LogLevel::Error));
    let m = &ac.layer("Outfit").unwrap().state_machine;
    assert_eq!(m.entry_transitions.len(), 1);
    assert!(m.find_state("Formal Enabled").is_none());
    Ok(())
}

#[test]
fn menu_item_wiring_depends_on_item_type() -> Result<()> {
    let (mut scene, root) = avatar();
    let hat = object(&scene, root, "Hat");
    let jacket = object(&scene, root, "Jacket");
    let mut controls = [
        SmartControl::new(ControlId(0), hat)
            .with_name("Hat")
            .with_menu_item(MenuItemType::Radial, None)
            .toggle(ComponentRef::transform(hat), true),
        SmartControl::new(ControlId(1), jacket)
            .with_name("Jacket")
            .with_menu_item(MenuItemType::Toggle, Some("jacket.png".into()))
            .toggle(ComponentRef::transform(jacket), false),
    ];
    compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    let radial = scene.object(hat).unwrap().menu_item.as_ref().unwrap();
    assert_eq!(radial.item_type, MenuItemType::Radial);
    assert_eq!(radial.sub_controllers.len(), 1);
    assert_eq!(radial.sub_controllers[0].parameter_name, "Hat");
    assert!(radial.controller.parameter_name.is_empty());

    let toggle = scene.object(jacket).unwrap().menu_item.as_ref().unwrap();
    assert_eq!(toggle.controller.parameter_name, "Jacket");
    assert!(toggle.sub_controllers.is_empty());
    assert_eq!(toggle.icon.as_deref(), Some("jacket.png"));
    Ok(())
}

#[test]
fn generated_parameter_names_are_unique() -> Result<()> {
    let (mut scene, root) = avatar();
    let hat = object(&scene, root, "Hat");
    let jacket = object(&scene, root, "Jacket");
    let mut controls = [
        SmartControl::new(ControlId(0), hat).with_name("Wear"),
        SmartControl::new(ControlId(1), jacket).with_name("Wear"),
    ];
    let (ac, _) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;
    assert!(ac.parameter("Wear").is_some());
    assert!(ac.parameter("Wear_1").is_some());
    assert_eq!(controls[1].animator_config.parameter_name.as_deref(), Some("Wear_1"));
    Ok(())
}

#[test]
fn generated_names_avoid_existing_parameters() -> Result<()> {
    let (mut scene, root) = avatar();
    let options = AnimatorOptions::new(root);
    let mut ac = AnimatorController::new("FX");
    ac.parameters.push(dressing_animation_core::AnimatorControllerParameter {
        name: "Hat".into(),
        parameter_type: ParameterType::Float,
        default_float: 0.5,
        default_int: 0,
        default_bool: false,
    });
    let mut ctx = Context::new(root);
    let hat = object(&scene, root, "Hat");
    let mut ctrl = SmartControl::new(ControlId(0), hat).toggle(ComponentRef::transform(hat), true);
    let mut composer = SmartControlComposer::new(&options, &mut ac);
    composer.compose(&mut ctx, &mut scene, &mut ctrl)?;
    composer.finish(&mut ctx, &mut scene)?;

    assert_eq!(ctrl.animator_config.parameter_name.as_deref(), Some("Hat_1"));
    assert_eq!(ac.parameter("Hat").map(|p| p.parameter_type), Some(ParameterType::Float));
    assert_eq!(ac.parameter("Hat_1").map(|p| p.parameter_type), Some(ParameterType::Bool));
    assert!(ac.layer("Hat_1").is_some());
    Ok(())
}

#[test]
fn parameter_type_mismatch_is_an_error() {
    let (mut scene, root) = avatar();
    let options = AnimatorOptions::new(root);
    let mut ac = AnimatorController::new("FX");
    ac.parameters.push(dressing_animation_core::AnimatorControllerParameter {
        name: "Hat".into(),
        parameter_type: ParameterType::Float,
        default_float: 0.0,
        default_int: 0,
        default_bool: false,
    });
    let mut ctx = Context::new(root);
    let mut ctrl = hat_toggle(&scene, root).with_parameter_name("Hat");
    let mut composer = SmartControlComposer::new(&options, &mut ac);
    let err = composer
        .compose(&mut ctx, &mut scene, &mut ctrl)
        .unwrap_err();
    assert!(matches!(
        err,
        ComposeError::ParameterTypeMismatch {
            expected: ParameterType::Bool,
            actual: ParameterType::Float,
            ..
        }
    ));
}

#[test]
fn motion_time_control_drives_a_single_state() -> Result<()> {
    let (mut scene, root) = avatar();
    let body = object(&scene, root, "Body");
    let mut controls = [SmartControl::new(ControlId(0), body)
        .with_name("Blush")
        .as_motion_time()
        .add_property_group(
            PropertyGroup::new()
                .with_selected_objects([body])
                .change_property_range("blendShape.Blush", 0.0, 100.0),
        )];
    let (ac, _) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    assert_eq!(ac.parameter("Blush").unwrap().parameter_type, ParameterType::Float);
    let layer = ac.layer("Blush").unwrap();
    assert_eq!(layer.state_machine.states.len(), 1);
    let s = state(layer, MOTION_TIME_STATE);
    assert_eq!(s.time_parameter.as_deref(), Some("Blush"));
    let curve = s
        .motion
        .as_ref()
        .unwrap()
        .find_curve("Body", "SkinnedMeshRenderer", "blendShape.Blush")
        .unwrap();
    assert_eq!(curve.evaluate(0.5), Some(50.0));
    Ok(())
}

#[test]
fn phys_bone_grab_gates_a_binary_layer() -> Result<()> {
    let (mut scene, root) = avatar();
    let tail = object(&scene, root, "Armature/Hips/Tail");
    let hat = object(&scene, root, "Hat");
    let bone = scene.find_component(tail, "VRCPhysBone").expect("phys bone");
    let mut controls = [SmartControl::new(ControlId(0), tail)
        .with_name("Tail Grab")
        .with_phys_bone(bone, PhysBoneCondition::Grabbed, PhysBoneSource::None)
        .toggle(ComponentRef::transform(hat), true)];
    let (ac, _) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    assert_eq!(
        controls[0].phys_bone_config.parameter_prefix.as_deref(),
        Some("Tail_Grab")
    );
    assert_eq!(
        scene.component(bone).unwrap().property("parameter"),
        Some(Value::Text("Tail_Grab".into()))
    );
    assert_eq!(
        ac.parameter("Tail_Grab_IsGrabbed").unwrap().parameter_type,
        ParameterType::Bool
    );

    let m = &ac.layer("Tail_Grab").unwrap().state_machine;
    assert_eq!(m.entry_transitions.len(), 1);
    assert_eq!(m.entry_transitions[0].conditions[0].mode, ConditionMode::If);
    assert_eq!(m.entry_transitions[0].conditions[0].parameter, "Tail_Grab_IsGrabbed");
    assert!(m.find_state(PREPARE_DISABLED_STATE).is_some());
    Ok(())
}

#[test]
fn phys_bone_source_adds_a_gated_motion_time_state() -> Result<()> {
    let (mut scene, root) = avatar();
    let tail = object(&scene, root, "Armature/Hips/Tail");
    let body = object(&scene, root, "Body");
    let bone = scene.find_component(tail, "VRCPhysBone").expect("phys bone");
    let mut ctrl = SmartControl::new(ControlId(0), tail)
        .with_name("Tail")
        .with_phys_bone(bone, PhysBoneCondition::GrabbedOrPosed, PhysBoneSource::Angle)
        .add_property_group(
            PropertyGroup::new()
                .with_selected_objects([body])
                .change_property_range("blendShape.Smile", 0.0, 100.0),
        );
    ctrl.phys_bone_config.parameter_prefix = Some("TailBone".into());
    let mut controls = [ctrl];
    let (ac, _) = compose_pass(&mut scene, root, true, Vec::new(), &mut controls)?;

    assert!(ac.parameter("TailBone_IsGrabbed").is_some());
    assert!(ac.parameter("TailBone_IsPosed").is_some());
    assert_eq!(ac.parameter("TailBone_Angle").unwrap().parameter_type, ParameterType::Float);

    let layer = ac.layer("TailBone").unwrap();
    let m = &layer.state_machine;
    assert_eq!(m.entry_transitions.len(), 2);
    let active = state(layer, MOTION_TIME_STATE);
    assert_eq!(active.time_parameter.as_deref(), Some("TailBone_Angle"));
    // leaving needs both signals off
    assert_eq!(active.transitions.len(), 1);
    assert_eq!(active.transitions[0].conditions.len(), 2);
    Ok(())
}

#[test]
fn cross_control_actions_attach_parameter_drivers() -> Result<()> {
    let (mut scene, root) = avatar();
    let jacket = object(&scene, root, "Jacket");
    let mut controls = [
        hat_toggle(&scene, root).cross_control_value_on_enable(ControlId(1), 0.0),
        SmartControl::new(ControlId(1), jacket)
            .with_name("Jacket")
            .toggle(ComponentRef::transform(jacket), true),
    ];
    let (ac, ctx) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;
    assert!(!ctx.report.has_log_type(LogLevel::Error));

    let enabled = state(ac.layer("Hat").unwrap(), ENABLED_STATE);
    assert_eq!(enabled.behaviours.len(), 1);
    let StateBehaviour::ParameterDriver { parameters, .. } = &enabled.behaviours[0];
    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters[0].name, "Jacket");
    assert_eq!(parameters[0].value, 0.0);
    assert!(state(ac.layer("Jacket").unwrap(), ENABLED_STATE).behaviours.is_empty());
    Ok(())
}

#[test]
fn cross_control_cycle_is_reported_without_drivers() -> Result<()> {
    let (mut scene, root) = avatar();
    let jacket = object(&scene, root, "Jacket");
    let mut controls = [
        hat_toggle(&scene, root).cross_control_value_on_enable(ControlId(1), 1.0),
        SmartControl::new(ControlId(1), jacket)
            .with_name("Jacket")
            .cross_control_value_on_enable(ControlId(0), 1.0),
    ];
    let (ac, ctx) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    assert_eq!(ctx.report.entries_of(LogLevel::Error).count(), 2);
    let any_driver = ac
        .layers
        .iter()
        .flat_map(|l| &l.state_machine.states)
        .any(|s| !s.behaviours.is_empty());
    assert!(!any_driver);
    Ok(())
}

#[test]
fn crossed_enable_disable_actions_are_a_cycle() -> Result<()> {
    let (mut scene, root) = avatar();
    let jacket = object(&scene, root, "Jacket");
    let mut controls = [
        hat_toggle(&scene, root)
            .cross_control_value_on_enable(ControlId(1), 0.0)
            .cross_control_value_on_disable(ControlId(1), 1.0),
        SmartControl::new(ControlId(1), jacket)
            .with_name("Jacket")
            .toggle(ComponentRef::transform(jacket), true)
            .cross_control_value_on_enable(ControlId(0), 0.0)
            .cross_control_value_on_disable(ControlId(0), 1.0),
    ];
    let (ac, ctx) = compose_pass(&mut scene, root, false, Vec::new(), &mut controls)?;

    let errors: Vec<_> = ctx.report.entries_of(LogLevel::Error).collect();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.message.contains("Hat")));
    assert!(errors.iter().any(|e| e.message.contains("Jacket")));
    for name in ["Hat", "Jacket"] {
        let layer = ac.layer(name).expect("layer is still generated");
        assert!(layer.state_machine.states.iter().all(|s| s.behaviours.is_empty()));
    }
    Ok(())
}

#[test]
fn clips_bind_current_paths_of_moved_objects() -> Result<()> {
    let (mut scene, root) = avatar();
    let remapper = PathRemapper::new(&scene, root);
    let hat = object(&scene, root, "Hat");
    let jacket = object(&scene, root, "Jacket");
    scene.set_parent(hat, Some(jacket))?;

    let options = AnimatorOptions::new(root);
    let mut ac = AnimatorController::new("FX");
    let mut ctx = Context::new(root).with_feature(remapper);
    let mut ctrl = hat_toggle(&scene, root);
    let mut composer = SmartControlComposer::new(&options, &mut ac);
    composer.compose(&mut ctx, &mut scene, &mut ctrl)?;
    composer.finish(&mut ctx, &mut scene)?;

    let layer = ac.layer("Hat").expect("Hat layer");
    for state_name in [ENABLED_STATE, PREPARE_DISABLED_STATE] {
        let clip = state(layer, state_name).motion.as_ref().expect("clip");
        let paths: Vec<&str> = clip.curves.iter().map(|c| c.binding.path.as_str()).collect();
        assert_eq!(paths, vec!["Jacket/Hat"], "{state_name}");
    }
    Ok(())
}
