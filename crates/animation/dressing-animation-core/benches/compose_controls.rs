use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dressing_animation_core::{
    control::PropertyGroup, AnimatorController, AnimatorOptions, Context, ControlId, ObjectId,
    Scene, SmartControl, SmartControlComposer,
};
use dressing_api_core::ComponentRef;
use dressing_test_fixtures::scenes;

const TARGETS: &[&str] = &["Hat", "Jacket", "Outfits/Casual", "Outfits/Formal", "Outfits/Sporty"];

fn controls(scene: &Scene, root: ObjectId, count: usize) -> Vec<SmartControl> {
    let body = scene.find(root, "Body").expect("body");
    (0..count)
        .map(|i| {
            let target = scene.find(root, TARGETS[i % TARGETS.len()]).expect("target");
            let mut ctrl = SmartControl::new(ControlId(i as u32), target)
                .with_name(format!("Control {i}"))
                .toggle(ComponentRef::transform(target), i % 2 == 0)
                .add_property_group(
                    PropertyGroup::new()
                        .with_selected_objects([body])
                        .change_property("blendShape.Smile", 100.0),
                );
            if i > 0 {
                ctrl = ctrl.cross_control_value_on_enable(ControlId(i as u32 - 1), 0.0);
            }
            ctrl
        })
        .collect()
}

fn compose_all(scene: &Scene, root: ObjectId, template: &[SmartControl], write_defaults: bool) -> AnimatorController {
    let mut scene = scene.clone();
    let mut controls = template.to_vec();
    let options = AnimatorOptions::new(root).with_write_defaults(write_defaults);
    let mut controller = AnimatorController::new("FX");
    let mut ctx = Context::new(root);
    let mut composer = SmartControlComposer::new(&options, &mut controller);
    for ctrl in controls.iter_mut() {
        composer.compose(&mut ctx, &mut scene, ctrl).expect("compose");
    }
    composer.finish(&mut ctx, &mut scene).expect("finish");
    controller
}

fn bench_compose(c: &mut Criterion) {
    let (scene, root) = scenes::load("composer-avatar").expect("composer avatar fixture");
    let mut group = c.benchmark_group("compose_controls");
    for count in [8usize, 64, 256] {
        let template = controls(&scene, root, count);
        for write_defaults in [false, true] {
            let id = BenchmarkId::new(if write_defaults { "wd_on" } else { "wd_off" }, count);
            group.bench_with_input(id, &template, |b, template| {
                b.iter(|| black_box(compose_all(&scene, root, template, write_defaults)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
