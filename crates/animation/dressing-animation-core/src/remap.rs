//! PathRemapper: resolves paths recorded before hierarchy edits to the
//! paths the same objects have now.
//!
//! The remapper snapshots every object's path below the avatar root when it
//! is built. Later passes may reparent objects (grouping bones into
//! containers, moving dynamics); remapping an original path then yields the
//! object's current path relative to the avatar root.

use dressing_api_core::{ObjectId, Scene};
use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;

use crate::error::{ComposeError, Result};

#[derive(Debug, Clone)]
pub struct PathRemapper {
    avatar_root: ObjectId,
    original_paths: IndexMap<ObjectId, Vec<String>>,
    by_original: HashMap<String, ObjectId>,
    container_bones: HashSet<ObjectId>,
}

impl PathRemapper {
    /// Snapshot the current path of every descendant of `avatar_root`.
    pub fn new(scene: &Scene, avatar_root: ObjectId) -> Self {
        let mut remapper = Self::identity(avatar_root);
        for obj in scene.descendants(avatar_root, false) {
            if let Some(path) = scene.relative_path(obj, avatar_root) {
                remapper.add_original_path(obj, path);
            }
        }
        remapper
    }

    /// A remapper with no recorded paths; every path maps to itself.
    pub fn identity(avatar_root: ObjectId) -> Self {
        Self {
            avatar_root,
            original_paths: IndexMap::new(),
            by_original: HashMap::new(),
            container_bones: HashSet::new(),
        }
    }

    pub fn avatar_root(&self) -> ObjectId {
        self.avatar_root
    }

    /// Record an additional original path for `obj`. The first object
    /// recorded for a path wins, matching first-child path lookup.
    pub fn add_original_path(&mut self, obj: ObjectId, path: impl Into<String>) {
        let path = path.into();
        self.by_original.entry(path.clone()).or_insert(obj);
        self.original_paths.entry(obj).or_default().push(path);
    }

    pub fn original_paths(&self, obj: ObjectId) -> &[String] {
        self.original_paths
            .get(&obj)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Mark `obj` as a grouping container that curves must not bind to.
    pub fn tag_container_bone(&mut self, obj: ObjectId) {
        self.container_bones.insert(obj);
    }

    pub fn is_container_bone(&self, obj: ObjectId) -> bool {
        self.container_bones.contains(&obj)
    }

    /// Current path of the object originally at `path`. Unknown paths, and
    /// objects that have left the avatar, map to themselves.
    pub fn remap(&self, scene: &Scene, path: &str) -> String {
        self.by_original
            .get(path)
            .and_then(|obj| scene.relative_path(*obj, self.avatar_root))
            .unwrap_or_else(|| path.to_string())
    }

    /// Like [`PathRemapper::remap`], but resolves tagged container bones to
    /// their nearest untagged ancestor.
    pub fn remap_avoiding_container_bones(&self, scene: &Scene, path: &str) -> Result<String> {
        let Some(&obj) = self.by_original.get(path) else {
            return Ok(path.to_string());
        };
        let mut current = Some(obj);
        while let Some(c) = current {
            if !self.container_bones.contains(&c) {
                break;
            }
            if c == self.avatar_root {
                return Err(ComposeError::ContainerBoneRoot {
                    path: path.to_string(),
                });
            }
            current = scene.parent(c);
        }
        let resolved = current.and_then(|c| scene.relative_path(c, self.avatar_root));
        match resolved {
            Some(p) => Ok(p),
            None => Err(ComposeError::ContainerBoneRoot {
                path: path.to_string(),
            }),
        }
    }
}
