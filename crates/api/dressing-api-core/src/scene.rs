//! Scene: an arena of GameObjects forming a parent/child hierarchy.
//!
//! Objects are addressed by [`ObjectId`], which stays stable across
//! reparenting. Paths are always computed on demand from the live hierarchy,
//! so moving an object immediately changes its relative path.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::component::{Component, ComponentRef};
use crate::menu::{MenuItem, ParameterConfig};
use crate::scene_path::ScenePath;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),
    #[error("cannot parent {child} under {parent}: it would create a cycle")]
    CyclicParent { child: ObjectId, parent: ObjectId },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameObject {
    pub name: String,
    /// activeSelf; inactive parents do not change this flag.
    pub active: bool,
    pub parent: Option<ObjectId>,
    pub children: Vec<ObjectId>,
    /// Index 0 is always the Transform.
    pub components: Vec<Component>,
    pub menu_item: Option<MenuItem>,
    pub parameter_configs: Vec<ParameterConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<GameObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Create an active object with a Transform, optionally under `parent`.
    pub fn create_object(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(GameObject {
            name: name.into(),
            active: true,
            parent: None,
            children: Vec::new(),
            components: vec![Component::transform()],
            menu_item: None,
            parameter_configs: Vec::new(),
        });
        if let Some(p) = parent {
            if let Some(po) = self.objects.get_mut(p.0 as usize) {
                po.children.push(id);
                self.objects[id.0 as usize].parent = Some(p);
            }
        }
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id.0 as usize)
    }

    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.object(id).map(|o| o.name.as_str())
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.object(id).and_then(|o| o.parent)
    }

    pub fn is_active_self(&self, id: ObjectId) -> bool {
        self.object(id).map(|o| o.active).unwrap_or(false)
    }

    pub fn set_active(&mut self, id: ObjectId, active: bool) {
        if let Some(o) = self.object_mut(id) {
            o.active = active;
        }
    }

    /// Move `child` under `new_parent` (or to the scene root). The child is
    /// appended as the last sibling.
    pub fn set_parent(
        &mut self,
        child: ObjectId,
        new_parent: Option<ObjectId>,
    ) -> Result<(), SceneError> {
        if self.object(child).is_none() {
            return Err(SceneError::UnknownObject(child));
        }
        if let Some(p) = new_parent {
            if self.object(p).is_none() {
                return Err(SceneError::UnknownObject(p));
            }
            if p == child || self.is_descendant(child, p) {
                return Err(SceneError::CyclicParent { child, parent: p });
            }
        }
        if let Some(old) = self.parent(child) {
            if let Some(po) = self.object_mut(old) {
                po.children.retain(|c| *c != child);
            }
        }
        if let Some(p) = new_parent {
            if let Some(po) = self.object_mut(p) {
                po.children.push(child);
            }
        }
        if let Some(co) = self.object_mut(child) {
            co.parent = new_parent;
        }
        Ok(())
    }

    /// Resolve a slash-separated path below `root`. The empty path is `root`
    /// itself; each segment picks the first child with a matching name.
    pub fn find(&self, root: ObjectId, path: &str) -> Option<ObjectId> {
        let path = ScenePath::parse(path).ok()?;
        let mut current = root;
        for segment in path.segments() {
            current = *self
                .object(current)?
                .children
                .iter()
                .find(|c| self.name(**c) == Some(segment))?;
        }
        Some(current)
    }

    /// Path of `obj` relative to `root`, or `None` when `obj` is not `root`
    /// or one of its descendants.
    pub fn relative_path(&self, obj: ObjectId, root: ObjectId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = obj;
        while current != root {
            let o = self.object(current)?;
            names.push(o.name.as_str());
            current = o.parent?;
        }
        names.reverse();
        Some(names.join("/"))
    }

    /// Strict descendant test: an object is not its own descendant.
    pub fn is_descendant(&self, ancestor: ObjectId, obj: ObjectId) -> bool {
        let mut current = self.parent(obj);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    /// Pre-order walk below `root`, inactive objects included.
    pub fn descendants(&self, root: ObjectId, include_root: bool) -> Vec<ObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id != root || include_root {
                out.push(id);
            }
            if let Some(o) = self.object(id) {
                stack.extend(o.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn add_component(&mut self, obj: ObjectId, component: Component) -> Option<ComponentRef> {
        let o = self.object_mut(obj)?;
        o.components.push(component);
        Some(ComponentRef::new(obj, o.components.len() - 1))
    }

    pub fn component(&self, r: ComponentRef) -> Option<&Component> {
        self.object(r.object)?.components.get(r.index)
    }

    pub fn component_mut(&mut self, r: ComponentRef) -> Option<&mut Component> {
        self.object_mut(r.object)?.components.get_mut(r.index)
    }

    /// First component of `obj` with the given type name.
    pub fn find_component(&self, obj: ObjectId, type_name: &str) -> Option<ComponentRef> {
        self.object(obj)?
            .components
            .iter()
            .position(|c| c.type_name == type_name)
            .map(|index| ComponentRef::new(obj, index))
    }

    /// First component of `obj` whose mesh carries blendshapes.
    pub fn find_mesh_renderer(&self, obj: ObjectId) -> Option<ComponentRef> {
        self.object(obj)?
            .components
            .iter()
            .position(Component::has_mesh)
            .map(|index| ComponentRef::new(obj, index))
    }
}
