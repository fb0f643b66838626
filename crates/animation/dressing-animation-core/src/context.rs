//! Per-pass context shared by the generators: the avatar being built, the
//! diagnostics report, unique asset naming and pass-wide feature services.

use std::any::{Any, TypeId};
use std::rc::Rc;

use dressing_api_core::ObjectId;
use hashbrown::{HashMap, HashSet};

use crate::clip::AnimationClip;
use crate::remap::PathRemapper;
use crate::report::Report;

pub struct Context {
    pub avatar: ObjectId,
    pub report: Report,
    asset_names: HashSet<String>,
    features: HashMap<TypeId, Rc<dyn Any>>,
}

impl Context {
    pub fn new(avatar: ObjectId) -> Self {
        Self {
            avatar,
            report: Report::new(),
            asset_names: HashSet::new(),
            features: HashMap::new(),
        }
    }

    /// Register a pass-wide service, replacing any previous one of the same type.
    pub fn with_feature<T: Any>(mut self, feature: T) -> Self {
        self.add_feature(feature);
        self
    }

    pub fn add_feature<T: Any>(&mut self, feature: T) {
        self.features.insert(TypeId::of::<T>(), Rc::new(feature));
    }

    pub fn feature<T: Any>(&self) -> Option<Rc<T>> {
        let any = self.features.get(&TypeId::of::<T>())?.clone();
        any.downcast::<T>().ok()
    }

    /// The registered [`PathRemapper`], or an identity remapper for the avatar.
    pub fn path_remapper(&self) -> Rc<PathRemapper> {
        self.feature::<PathRemapper>()
            .unwrap_or_else(|| Rc::new(PathRemapper::identity(self.avatar)))
    }

    /// Reserve a collision-free asset name derived from `suggested`.
    pub fn create_unique_asset(&mut self, suggested: &str) -> String {
        let base = if suggested.is_empty() { "Asset" } else { suggested };
        let mut name = base.to_string();
        let mut n = 1u32;
        while self.asset_names.contains(&name) {
            name = format!("{base}_{n}");
            n = n.wrapping_add(1);
        }
        self.asset_names.insert(name.clone());
        name
    }

    /// An empty clip registered under a unique name.
    pub fn new_clip(&mut self, suggested: &str) -> AnimationClip {
        AnimationClip::new(self.create_unique_asset(suggested))
    }
}
