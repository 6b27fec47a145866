//! Per-hook context and host resources

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::{Scene, SceneError};
use crate::ecs::{Component, EntityId, TransformCache};
use crate::foundation::math::Vec2;
use crate::foundation::time::FrameTime;

/// Type-keyed store for host state (renderer, physics, input, score...)
///
/// The scene never interprets these values; it only hands them to hooks.
#[derive(Default)]
pub struct Resources {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, returning the previous value of the same type
    pub fn insert<R: Any>(&mut self, resource: R) -> Option<R> {
        self.values
            .insert(TypeId::of::<R>(), Box::new(resource))
            .and_then(|old| old.downcast::<R>().ok())
            .map(|old| *old)
    }

    /// Remove a resource
    pub fn remove<R: Any>(&mut self) -> Option<R> {
        self.values
            .remove(&TypeId::of::<R>())
            .and_then(|old| old.downcast::<R>().ok())
            .map(|old| *old)
    }

    /// Borrow a resource
    pub fn get<R: Any>(&self) -> Option<&R> {
        self.values.get(&TypeId::of::<R>()).and_then(|value| value.downcast_ref())
    }

    /// Mutably borrow a resource
    pub fn get_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.values.get_mut(&TypeId::of::<R>()).and_then(|value| value.downcast_mut())
    }

    /// Whether a resource of type `R` is present
    pub fn contains<R: Any>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<R>())
    }

    /// Number of stored resources
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources").field("len", &self.values.len()).finish()
    }
}

/// Context handed to every component hook
///
/// Bound to the entity that owns the running component. The whole scene is
/// reachable through it, so hooks can spawn, reparent and destroy other
/// entities; structural changes to the live set are applied at the next
/// flush.
pub struct FrameContext<'a> {
    scene: &'a mut Scene,
    entity: EntityId,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, entity: EntityId) -> Self {
        Self { scene, entity }
    }

    /// Entity that owns the running component
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Frame clock
    pub fn time(&self) -> &FrameTime {
        self.scene.time()
    }

    /// Scaled delta time in seconds
    pub fn delta_time(&self) -> f32 {
        self.scene.time().delta()
    }

    /// Real delta time in seconds
    pub fn unscaled_delta_time(&self) -> f32 {
        self.scene.time().unscaled_delta()
    }

    /// Current time scale
    pub fn time_scale(&self) -> f32 {
        self.scene.time().time_scale()
    }

    /// Frame counter
    pub fn frame(&self) -> u64 {
        self.scene.time().frame()
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// The scene, mutably
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    /// Borrow a host resource
    pub fn resource<R: Any>(&self) -> Option<&R> {
        self.scene.resources().get::<R>()
    }

    /// Mutably borrow a host resource
    pub fn resource_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.scene.resources_mut().get_mut::<R>()
    }

    /// Local transform of the owning entity
    pub fn transform(&self) -> Result<&TransformCache, SceneError> {
        self.scene.transform(self.entity)
    }

    /// Mutable local transform of the owning entity
    pub fn transform_mut(&mut self) -> Result<&mut TransformCache, SceneError> {
        self.scene.transform_mut(self.entity)
    }

    /// World-space position of the owning entity
    pub fn global_position(&self) -> Result<Vec2, SceneError> {
        self.scene.global_position(self.entity)
    }

    /// Queue the owning entity (and its subtree) for destruction
    pub fn destroy_self(&mut self) -> Result<(), SceneError> {
        self.scene.destroy(self.entity)
    }

    /// Sibling component on the owning entity
    pub fn get_component<C: Component>(&self) -> Result<&C, SceneError> {
        self.scene.get_component::<C>(self.entity)
    }

    /// Mutable sibling component on the owning entity
    pub fn get_component_mut<C: Component>(&mut self) -> Result<&mut C, SceneError> {
        self.scene.get_component_mut::<C>(self.entity)
    }

    /// Sibling component on the owning entity, if present and not busy
    pub fn try_get_component<C: Component>(&self) -> Option<&C> {
        self.scene.try_get_component::<C>(self.entity)
    }

    /// Mutable sibling component, if present and not busy
    pub fn try_get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.scene.try_get_component_mut::<C>(self.entity)
    }
}
