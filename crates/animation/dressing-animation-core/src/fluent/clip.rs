use dressing_api_core::{ComponentKind, ComponentRef, ObjectId, Scene};

use crate::clip::{
    AnimationClip, AnimationCurve, CurveBinding, ObjectReferenceKeyframe, BLENDSHAPE_PREFIX,
    ENABLED_PROPERTY, GAME_OBJECT_TYPE, IS_ACTIVE_PROPERTY,
};
use crate::remap::PathRemapper;

/// Turns scene objects into curve paths: path relative to the animator root,
/// then passed through the remapper.
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    scene: &'a Scene,
    root: ObjectId,
    remapper: &'a PathRemapper,
}

impl<'a> PathResolver<'a> {
    pub fn new(scene: &'a Scene, root: ObjectId, remapper: &'a PathRemapper) -> Self {
        Self {
            scene,
            root,
            remapper,
        }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn path_of(&self, obj: ObjectId) -> String {
        let path = self
            .scene
            .relative_path(obj, self.root)
            .or_else(|| self.scene.name(obj).map(str::to_string))
            .unwrap_or_default();
        self.remapper.remap(self.scene, &path)
    }
}

/// Fluent setter surface over one clip. Property names are not validated;
/// bindings to properties the target lacks are kept and simply animate
/// nothing.
pub struct ClipBuilder<'a> {
    resolver: PathResolver<'a>,
    clip: AnimationClip,
}

impl<'a> ClipBuilder<'a> {
    pub fn new(resolver: PathResolver<'a>, clip: AnimationClip) -> Self {
        Self { resolver, clip }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    pub fn build(self) -> AnimationClip {
        self.clip
    }

    /// Set a float curve at a raw path, used as given.
    pub fn set_curve(
        &mut self,
        path: &str,
        type_name: &str,
        property: &str,
        curve: AnimationCurve,
    ) -> &mut Self {
        self.clip
            .set_curve(CurveBinding::new(path, type_name, property), curve);
        self
    }

    /// Set a float curve on an object, resolving its path.
    pub fn set_object_curve(
        &mut self,
        obj: ObjectId,
        type_name: &str,
        property: &str,
        curve: AnimationCurve,
    ) -> &mut Self {
        let path = self.resolver.path_of(obj);
        self.set_curve(&path, type_name, property, curve)
    }

    pub fn set_object_reference_curve(
        &mut self,
        path: &str,
        type_name: &str,
        property: &str,
        keyframes: Vec<ObjectReferenceKeyframe>,
    ) -> &mut Self {
        self.clip
            .set_object_curve(CurveBinding::new(path, type_name, property), keyframes);
        self
    }

    pub fn set_object_reference_curve_on(
        &mut self,
        obj: ObjectId,
        type_name: &str,
        property: &str,
        keyframes: Vec<ObjectReferenceKeyframe>,
    ) -> &mut Self {
        let path = self.resolver.path_of(obj);
        self.set_object_reference_curve(&path, type_name, property, keyframes)
    }

    /// Constant GameObject active-state curve.
    pub fn toggle_object(&mut self, obj: ObjectId, enabled: bool) -> &mut Self {
        self.set_object_curve(
            obj,
            GAME_OBJECT_TYPE,
            IS_ACTIVE_PROPERTY,
            AnimationCurve::constant(0.0, 0.0, if enabled { 1.0 } else { 0.0 }),
        )
    }

    /// Constant toggle of a component. A Transform stands for its GameObject.
    pub fn toggle(&mut self, target: ComponentRef, enabled: bool) -> &mut Self {
        let Some(component) = self.resolver.scene().component(target) else {
            return self;
        };
        match component.kind {
            ComponentKind::Transform => self.toggle_object(target.object, enabled),
            ComponentKind::Behaviour | ComponentKind::Other => {
                let type_name = component.type_name.clone();
                self.set_object_curve(
                    target.object,
                    &type_name,
                    ENABLED_PROPERTY,
                    AnimationCurve::constant(0.0, 0.0, if enabled { 1.0 } else { 0.0 }),
                )
            }
        }
    }

    /// Constant blendshape weight on a renderer.
    pub fn blendshape(&mut self, renderer: ComponentRef, name: &str, value: f32) -> &mut Self {
        self.blendshape_curve(renderer, name, AnimationCurve::constant(0.0, 0.0, value))
    }

    pub fn blendshape_curve(
        &mut self,
        renderer: ComponentRef,
        name: &str,
        curve: AnimationCurve,
    ) -> &mut Self {
        let Some(component) = self.resolver.scene().component(renderer) else {
            return self;
        };
        let type_name = component.type_name.clone();
        self.set_object_curve(
            renderer.object,
            &type_name,
            &format!("{BLENDSHAPE_PREFIX}{name}"),
            curve,
        )
    }
}
