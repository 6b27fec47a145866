//! Scene graph operations
//!
//! Parent/child links, global transform composition and the subtree walk
//! that the lifecycle passes are built on.
//!
//! Every entity owns its child list; the parent link is a lookup handle.
//! Reparenting updates both sides inside one call, so between calls an
//! entity is listed in exactly the child list of its `parent` (or in the
//! scene roots when it has none and has been added).

use super::{FrameContext, Scene, SceneError};
use crate::ecs::{Component, EntityId, EntityState};
use crate::foundation::math::{Mat3, Transform2D, Vec2};

/// What a subtree walk should do with the entity it just reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Run the component callback on this entity, then recurse
    Continue,
    /// Recurse into children without touching this entity's components
    SkipComponents,
    /// Skip this entity and its whole subtree
    Prune,
}

impl Scene {
    /// Parent `child` under `parent`
    ///
    /// Detaches `child` from its previous parent first. Re-adding an
    /// existing child is a no-op. A detached child brought under an
    /// in-scene parent joins the scene with its whole subtree and is
    /// initialized at the next flush.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), SceneError> {
        let parent_state = self.node(parent)?.state;
        let child_node = self.node(child)?;
        if child_node.parent == Some(parent) {
            return Ok(());
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::CyclicHierarchy { entity: child, parent });
        }
        let child_state = child_node.state;
        if child_state.in_scene() && !parent_state.in_scene() {
            return Err(SceneError::OutsideScene { entity: child });
        }

        self.unlink(child);
        if let Some(node) = self.entities.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.entities.get_mut(parent) {
            node.children.push(child);
        }

        if !child_state.in_scene() && parent_state.in_scene() {
            self.enqueue_subtree(child);
        }
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// An in-scene child becomes a scene root; a detached one stays detached.
    pub fn remove_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), SceneError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.unlink(child);
        if let Some(node) = self.entities.get_mut(child) {
            node.parent = None;
            if node.state.in_scene() {
                self.roots.push(child);
            }
        }
        Ok(())
    }

    /// Reparent `child`, or make it a root with `None`
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<(), SceneError> {
        match parent {
            Some(parent) => self.add_child(parent, child),
            None => match self.node(child)?.parent {
                Some(current) => self.remove_child(current, child),
                None => Ok(()),
            },
        }
    }

    /// Parent of `entity`
    pub fn parent(&self, entity: EntityId) -> Result<Option<EntityId>, SceneError> {
        Ok(self.node(entity)?.parent)
    }

    /// Children of `entity` in update order
    pub fn children(&self, entity: EntityId) -> Result<&[EntityId], SceneError> {
        Ok(&self.node(entity)?.children)
    }

    /// Whether `ancestor` is a strict ancestor of `entity`
    pub fn is_ancestor(&self, ancestor: EntityId, entity: EntityId) -> bool {
        let mut current = self.entities.get(entity).and_then(|node| node.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entities.get(id).and_then(|node| node.parent);
        }
        false
    }

    /// `entity` followed by all of its descendants, depth first
    pub fn subtree(&self, entity: EntityId) -> Result<Vec<EntityId>, SceneError> {
        self.node(entity)?;
        let mut out = Vec::new();
        let mut stack = vec![entity];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.entities.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    /// Composed transform from the root down to `entity`
    ///
    /// Walks the parent chain on every call; only local matrices are cached.
    pub fn global_transform(&self, entity: EntityId) -> Result<Mat3, SceneError> {
        let mut matrix = self.node(entity)?.transform.local_matrix();
        let mut current = self.entities.get(entity).and_then(|node| node.parent);
        while let Some(id) = current {
            let Some(node) = self.entities.get(id) else { break };
            matrix = node.transform.local_matrix() * matrix;
            current = node.parent;
        }
        Ok(matrix)
    }

    /// World-space position of `entity`
    pub fn global_position(&self, entity: EntityId) -> Result<Vec2, SceneError> {
        let matrix = self.global_transform(entity)?;
        Ok(Vec2::new(matrix.m13, matrix.m23))
    }

    /// World-space rotation of `entity` in radians
    pub fn global_rotation(&self, entity: EntityId) -> Result<f32, SceneError> {
        Ok(Transform2D::from_matrix(&self.global_transform(entity)?).rotation)
    }

    /// World-space scale of `entity`
    pub fn global_scale(&self, entity: EntityId) -> Result<Vec2, SceneError> {
        Ok(Transform2D::from_matrix(&self.global_transform(entity)?).scale)
    }

    /// Walk a subtree: entity, then its components, then each child subtree
    ///
    /// `on_entity` decides per entity whether its components run and
    /// whether to descend. Components are checked out for the duration of
    /// `on_component`, so the callback may mutate the scene freely. Child
    /// lists are snapshotted after the parent's components have run; a
    /// child that was reparented away in the meantime is skipped.
    pub fn for_each_in_subtree(
        &mut self,
        root: EntityId,
        include_self: bool,
        on_entity: &mut dyn FnMut(&mut Scene, EntityId) -> Result<Visit, SceneError>,
        on_component: &mut dyn FnMut(&mut dyn Component, &mut FrameContext<'_>) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        self.node(root)?;
        if include_self {
            self.visit_entity(root, on_entity, on_component)
        } else {
            self.visit_children(root, on_entity, on_component)
        }
    }

    fn visit_entity(
        &mut self,
        id: EntityId,
        on_entity: &mut dyn FnMut(&mut Scene, EntityId) -> Result<Visit, SceneError>,
        on_component: &mut dyn FnMut(&mut dyn Component, &mut FrameContext<'_>) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        if !self.entities.contains_key(id) {
            return Ok(());
        }
        match on_entity(self, id)? {
            Visit::Prune => return Ok(()),
            Visit::Continue => self.visit_components(id, on_component)?,
            Visit::SkipComponents => {}
        }
        self.visit_children(id, on_entity, on_component)
    }

    fn visit_children(
        &mut self,
        id: EntityId,
        on_entity: &mut dyn FnMut(&mut Scene, EntityId) -> Result<Visit, SceneError>,
        on_component: &mut dyn FnMut(&mut dyn Component, &mut FrameContext<'_>) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        let children = match self.entities.get(id) {
            Some(node) => node.children.clone(),
            None => return Ok(()),
        };
        for child in children {
            let still_child = self
                .entities
                .get(child)
                .is_some_and(|node| node.parent == Some(id));
            if still_child {
                self.visit_entity(child, on_entity, on_component)?;
            }
        }
        Ok(())
    }

    /// Run `on_component` on every component of `id` in insertion order
    pub(crate) fn visit_components(
        &mut self,
        id: EntityId,
        on_component: &mut dyn FnMut(&mut dyn Component, &mut FrameContext<'_>) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        let kinds: Vec<_> = match self.entities.get(id) {
            Some(node) => node.components.kinds().collect(),
            None => return Ok(()),
        };
        for kind in kinds {
            let Some(mut component) = self
                .entities
                .get_mut(id)
                .and_then(|node| node.components.checkout(kind))
            else {
                continue;
            };

            let result = {
                let mut ctx = FrameContext::new(self, id);
                on_component(component.as_mut(), &mut ctx)
            };

            let orphan = match self.entities.get_mut(id) {
                Some(node) => node.components.checkin(kind, component),
                None => Some(component),
            };
            if orphan.is_some() {
                log::debug!("Dropping {} from {:?}: it was detached or replaced during its own hook", kind, id);
            }
            result?;
        }
        Ok(())
    }

    /// Remove `entity` from its parent's child list, or from the roots
    pub(crate) fn unlink(&mut self, entity: EntityId) {
        match self.entities.get(entity).and_then(|node| node.parent) {
            Some(parent) => {
                if let Some(node) = self.entities.get_mut(parent) {
                    node.children.retain(|&c| c != entity);
                }
            }
            None => self.roots.retain(|&r| r != entity),
        }
        if let Some(node) = self.entities.get_mut(entity) {
            node.parent = None;
        }
    }

    /// Drop `entity` and its descendants from the arena
    pub(crate) fn remove_subtree(&mut self, entity: EntityId) -> usize {
        let Ok(ids) = self.subtree(entity) else {
            return 0;
        };
        self.unlink(entity);
        for &id in &ids {
            self.entities.remove(id);
        }
        ids.len()
    }

    /// Move a detached subtree into the scene, queued for initialization
    pub(crate) fn enqueue_subtree(&mut self, entity: EntityId) {
        if let Ok(ids) = self.subtree(entity) {
            for id in ids {
                if let Some(node) = self.entities.get_mut(id) {
                    node.state = EntityState::Pending;
                }
            }
        }
        self.pending_add.push(entity);
    }
}
