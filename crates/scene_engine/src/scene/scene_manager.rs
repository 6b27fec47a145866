//! # Scene Manager
//!
//! The frame/lifecycle coordinator. Owns every entity, the queues of
//! entities waiting to be initialized or destroyed, the frame clock and the
//! host resources, and drives one frame in a fixed order:
//!
//! 1. `initialize_added` flushes pending entities into the live set,
//!    running component `initialize` hooks parent first
//! 2. `remove_destroyed` runs `destroy` hooks parent first and drops the
//!    entities from the arena
//! 3. the frame clock advances
//! 4. every live root subtree is updated, parent before children
//!
//! Hooks may add, reparent or destroy entities at any point. Additions and
//! destructions only take effect at the next flush, so the update walk never
//! sees the live set change under it.

use std::any::Any;
use std::time::Duration;

use slotmap::SlotMap;

use super::factory::LayoutHints;
use super::{FrameContext, Resources, SceneError, Visit};
use crate::config::SceneConfig;
use crate::ecs::component::downcast_box;
use crate::ecs::{Component, ComponentKind, EntityId, EntityNode, EntityState, TransformCache};
use crate::foundation::math::Transform2D;
use crate::foundation::time::{FrameTime, Stopwatch};

/// Statistics for the most recent frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStats {
    /// Frames run so far
    pub frame: u64,

    /// Entities initialized by this frame's add flush
    pub initialized: usize,

    /// Entities removed by this frame's destroy flush
    pub destroyed: usize,

    /// Entities in the live set after the update pass
    pub live_count: usize,

    /// Entities waiting for the next add flush
    pub pending_count: usize,

    /// Time spent in the add flush (microseconds)
    pub initialize_time_us: u64,

    /// Time spent in the destroy flush (microseconds)
    pub destroy_time_us: u64,

    /// Time spent in the update pass (microseconds)
    pub update_time_us: u64,
}

impl SceneStats {
    /// Total time spent in the scene this frame in microseconds
    pub fn total_frame_time_us(&self) -> u64 {
        self.initialize_time_us + self.destroy_time_us + self.update_time_us
    }
}

/// Entity arena plus deferred lifecycle
pub struct Scene {
    pub(crate) entities: SlotMap<EntityId, EntityNode>,
    /// In-scene entities without a parent, in update order
    pub(crate) roots: Vec<EntityId>,
    pub(crate) pending_add: Vec<EntityId>,
    pub(crate) pending_destroy: Vec<EntityId>,
    resources: Resources,
    time: FrameTime,
    layout: LayoutHints,
    config: SceneConfig,
    stats: SceneStats,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with custom configuration
    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            entities: SlotMap::with_key(),
            roots: Vec::new(),
            pending_add: Vec::new(),
            pending_destroy: Vec::new(),
            resources: Resources::new(),
            time: FrameTime::new(config.time_scale),
            layout: LayoutHints::default(),
            config,
            stats: SceneStats::default(),
        }
    }

    // ---- Entities ----

    /// Create a detached entity
    ///
    /// It takes part in no lifecycle pass until it is added with
    /// [`add_entity`](Self::add_entity) or parented under an in-scene entity.
    pub fn spawn(&mut self) -> EntityId {
        self.entities.insert(EntityNode::new(None))
    }

    /// Create a detached entity with a debug name
    pub fn spawn_named(&mut self, name: impl Into<String>) -> EntityId {
        self.entities.insert(EntityNode::new(Some(name.into())))
    }

    /// Create a detached entity at a given local transform
    pub fn spawn_at(&mut self, transform: Transform2D) -> EntityId {
        let id = self.spawn();
        if let Some(node) = self.entities.get_mut(id) {
            node.transform = TransformCache::from_transform(transform);
        }
        id
    }

    /// Add a detached entity (and its subtree) to the scene
    ///
    /// The entity becomes a scene root and is initialized at the next
    /// flush. A detached parent link is dropped.
    pub fn add_entity(&mut self, entity: EntityId) -> Result<(), SceneError> {
        if self.node(entity)?.state.in_scene() {
            return Err(SceneError::AlreadyAdded(entity));
        }
        self.unlink(entity);
        self.roots.push(entity);
        self.enqueue_subtree(entity);
        log::debug!("Entity {:?} queued for initialization", entity);
        Ok(())
    }

    /// Queue `entity` and its subtree for destruction
    ///
    /// Live entities are destroyed at the next flush. Entities still
    /// waiting to be initialized are initialized first, then destroyed in the
    /// same flush. Detached entities never saw a lifecycle hook and are
    /// dropped immediately. Repeated calls are no-ops.
    pub fn destroy(&mut self, entity: EntityId) -> Result<(), SceneError> {
        if !self.node(entity)?.state.in_scene() {
            let removed = self.remove_subtree(entity);
            log::debug!("Dropped detached entity {:?} ({} nodes)", entity, removed);
            return Ok(());
        }

        for id in self.subtree(entity)? {
            let Some(node) = self.entities.get_mut(id) else { continue };
            match node.state {
                EntityState::Pending => node.destroy_requested = true,
                EntityState::Live => {
                    node.state = EntityState::PendingDestroy;
                    self.pending_destroy.push(id);
                }
                EntityState::PendingDestroy | EntityState::Detached => {}
            }
        }
        Ok(())
    }

    /// Whether the handle refers to an entity that has not been removed
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    /// Lifecycle state of `entity`
    pub fn state(&self, entity: EntityId) -> Result<EntityState, SceneError> {
        Ok(self.node(entity)?.state)
    }

    /// Whether `entity` is in the live set
    pub fn is_live(&self, entity: EntityId) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|node| node.state == EntityState::Live)
    }

    /// Debug name of `entity`
    pub fn name(&self, entity: EntityId) -> Result<Option<&str>, SceneError> {
        Ok(self.node(entity)?.name())
    }

    /// First entity with the given debug name
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(id, _)| id)
    }

    /// Entity node
    pub fn node(&self, entity: EntityId) -> Result<&EntityNode, SceneError> {
        self.entities.get(entity).ok_or(SceneError::EntityNotFound(entity))
    }

    pub(crate) fn node_mut(&mut self, entity: EntityId) -> Result<&mut EntityNode, SceneError> {
        self.entities.get_mut(entity).ok_or(SceneError::EntityNotFound(entity))
    }

    /// Local transform of `entity`
    pub fn transform(&self, entity: EntityId) -> Result<&TransformCache, SceneError> {
        Ok(&self.node(entity)?.transform)
    }

    /// Mutable local transform of `entity`
    pub fn transform_mut(&mut self, entity: EntityId) -> Result<&mut TransformCache, SceneError> {
        Ok(&mut self.node_mut(entity)?.transform)
    }

    /// Scene roots in update order
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Entities currently in the live set
    pub fn live_entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(|(_, node)| node.state == EntityState::Live)
            .map(|(id, _)| id)
    }

    /// Number of live entities
    pub fn live_count(&self) -> usize {
        self.live_entities().count()
    }

    /// Number of entities in the arena, detached ones included
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of entities waiting to be initialized
    pub fn pending_count(&self) -> usize {
        self.entities
            .values()
            .filter(|node| node.state == EntityState::Pending)
            .count()
    }

    // ---- Components ----

    /// Attach a component, replacing any instance of the same kind
    ///
    /// Returns the replaced instance. Its `destroy` hook is not run. When
    /// the entity has already been initialized the new component's
    /// `initialize` hook runs immediately.
    pub fn attach_component<C: Component>(
        &mut self,
        entity: EntityId,
        component: C,
    ) -> Result<Option<Box<C>>, SceneError> {
        let replaced = self.attach_boxed(entity, ComponentKind::of::<C>(), Box::new(component))?;
        Ok(replaced.and_then(downcast_box::<C>))
    }

    pub(crate) fn attach_boxed(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
        component: Box<dyn Component>,
    ) -> Result<Option<Box<dyn Component>>, SceneError> {
        let node = self.node_mut(entity)?;
        let replaced = node.components.insert_boxed(kind, component);
        let initialized = node.initialized;
        if replaced.is_some() {
            log::trace!("Replaced {} on {:?}", kind, entity);
        }
        if initialized {
            self.visit_component(entity, kind, &mut |component, ctx| component.initialize(ctx))?;
        }
        Ok(replaced)
    }

    /// Detach the component of type `C`
    ///
    /// No-op when absent. Its `destroy` hook is not run.
    pub fn detach_component<C: Component>(&mut self, entity: EntityId) -> Result<Option<Box<C>>, SceneError> {
        let kind = ComponentKind::of::<C>();
        let node = self.node_mut(entity)?;
        if node.components.is_busy(kind) {
            log::warn!("{} detached from {:?} while its own hook is running", kind, entity);
        }
        Ok(node.components.remove_kind(kind).and_then(downcast_box::<C>))
    }

    /// Borrow the component of type `C`
    pub fn get_component<C: Component>(&self, entity: EntityId) -> Result<&C, SceneError> {
        let kind = ComponentKind::of::<C>();
        let node = self.node(entity)?;
        if node.components.is_busy(kind) {
            return Err(SceneError::ComponentBusy { entity, kind });
        }
        node.components
            .get::<C>()
            .ok_or(SceneError::ComponentNotFound { entity, kind })
    }

    /// Mutably borrow the component of type `C`
    pub fn get_component_mut<C: Component>(&mut self, entity: EntityId) -> Result<&mut C, SceneError> {
        let kind = ComponentKind::of::<C>();
        let node = self.node_mut(entity)?;
        if node.components.is_busy(kind) {
            return Err(SceneError::ComponentBusy { entity, kind });
        }
        node.components
            .get_mut::<C>()
            .ok_or(SceneError::ComponentNotFound { entity, kind })
    }

    /// Borrow the component of type `C` if it is present and not busy
    ///
    /// A busy component is checked out of its slot while its hook runs, so
    /// the slot lookup alone yields `None` for it.
    pub fn try_get_component<C: Component>(&self, entity: EntityId) -> Option<&C> {
        self.entities.get(entity)?.components.get::<C>()
    }

    /// Mutably borrow the component of type `C` if it is present and not busy
    ///
    /// See [`try_get_component`](Self::try_get_component).
    pub fn try_get_component_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        self.entities.get_mut(entity)?.components.get_mut::<C>()
    }

    /// Whether `entity` has a component of type `C`
    pub fn has_component<C: Component>(&self, entity: EntityId) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|node| node.components.contains::<C>())
    }

    /// Every in-scene component of type `K`, in no particular order
    pub fn components_of_kind<K: Component>(&self) -> impl Iterator<Item = (EntityId, &K)> + '_ {
        self.entities.iter().filter_map(|(id, node)| {
            if node.state.in_scene() {
                node.components.get::<K>().map(|component| (id, component))
            } else {
                None
            }
        })
    }

    /// Components of type `K` on `root` and its descendants, parent first
    pub fn components_in_subtree<K: Component>(
        &self,
        root: EntityId,
    ) -> Result<impl Iterator<Item = (EntityId, &K)> + '_, SceneError> {
        let ids = self.subtree(root)?;
        Ok(ids.into_iter().filter_map(move |id| {
            self.entities
                .get(id)
                .and_then(|node| node.components.get::<K>())
                .map(|component| (id, component))
        }))
    }

    fn visit_component(
        &mut self,
        entity: EntityId,
        kind: ComponentKind,
        hook: &mut dyn FnMut(&mut dyn Component, &mut FrameContext<'_>) -> Result<(), SceneError>,
    ) -> Result<(), SceneError> {
        let Some(mut component) = self
            .entities
            .get_mut(entity)
            .and_then(|node| node.components.checkout(kind))
        else {
            return Ok(());
        };
        let result = {
            let mut ctx = FrameContext::new(self, entity);
            hook(component.as_mut(), &mut ctx)
        };
        if let Some(node) = self.entities.get_mut(entity) {
            node.components.checkin(kind, component);
        }
        result
    }

    // ---- Resources and time ----

    /// Host resources
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Host resources, mutably
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Insert a host resource, returning the previous one of the same type
    pub fn insert_resource<R: Any>(&mut self, resource: R) -> Option<R> {
        self.resources.insert(resource)
    }

    /// Borrow a host resource
    pub fn resource<R: Any>(&self) -> Option<&R> {
        self.resources.get::<R>()
    }

    /// Mutably borrow a host resource
    pub fn resource_mut<R: Any>(&mut self) -> Option<&mut R> {
        self.resources.get_mut::<R>()
    }

    /// Frame clock
    pub fn time(&self) -> &FrameTime {
        &self.time
    }

    /// Change the time scale applied from the next frame on
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time.set_time_scale(time_scale);
    }

    /// Layout hints from the last loaded scene
    pub fn layout(&self) -> &LayoutHints {
        &self.layout
    }

    pub(crate) fn set_layout(&mut self, layout: LayoutHints) {
        self.layout = layout;
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Statistics for the most recent frame
    pub fn stats(&self) -> &SceneStats {
        &self.stats
    }

    // ---- Lifecycle ----

    /// Run one frame
    ///
    /// `unscaled_delta` is real elapsed time in seconds; non-finite and
    /// negative values count as zero and long stalls are clamped to
    /// `max_delta_time`. The first hook error aborts the frame.
    pub fn run_frame(&mut self, unscaled_delta: f32) -> Result<(), SceneError> {
        let delta = self.clamp_delta(unscaled_delta);
        let mut stopwatch = Stopwatch::start_new();

        let initialized = self.initialize_added()?;
        let initialize_time = stopwatch.lap();

        let destroyed = self.remove_destroyed()?;
        let destroy_time = stopwatch.lap();

        self.time.advance(delta);
        self.update_live()?;
        let update_time = stopwatch.lap();

        if self.config.enable_stats {
            self.update_stats(initialized, destroyed, [initialize_time, destroy_time, update_time]);
        }
        Ok(())
    }

    /// Flush pending entities into the live set
    ///
    /// Runs `initialize` hooks top-down. Entities added by those hooks are
    /// flushed in the same call. Returns the number of entities initialized.
    ///
    /// On a hook error the failing entity and the rest of the batch go back
    /// to the front of the queue, so the next flush picks them up. Entities
    /// already initialized are skipped then.
    pub fn initialize_added(&mut self) -> Result<usize, SceneError> {
        let mut initialized = 0;
        while !self.pending_add.is_empty() {
            let mut batch = std::mem::take(&mut self.pending_add).into_iter();
            while let Some(id) = batch.next() {
                if !self.entities.contains_key(id) {
                    continue;
                }
                let result = self.for_each_in_subtree(
                    id,
                    true,
                    &mut |scene, entity| Ok(scene.enter_initialize(entity, &mut initialized)),
                    &mut |component, ctx| component.initialize(ctx),
                );
                if let Err(error) = result {
                    requeue(&mut self.pending_add, id, batch);
                    return Err(error);
                }
            }
        }
        Ok(initialized)
    }

    /// Flush the destroy queue
    ///
    /// Runs `destroy` hooks top-down over each destroyed subtree, then drops
    /// it from the arena. Entities queued by those hooks are flushed in the
    /// same call. Returns the number of entities removed.
    ///
    /// On a hook error the failing subtree stays in the arena and goes back
    /// to the front of the queue with the rest of the batch; its destroy pass
    /// is retried at the next flush.
    pub fn remove_destroyed(&mut self) -> Result<usize, SceneError> {
        let mut removed = 0;
        while !self.pending_destroy.is_empty() {
            let mut batch = std::mem::take(&mut self.pending_destroy).into_iter();
            while let Some(id) = batch.next() {
                if !self.is_destroy_root(id) {
                    continue;
                }
                let result = self.for_each_in_subtree(
                    id,
                    true,
                    &mut |scene, entity| scene.enter_destroy(entity),
                    &mut |component, ctx| component.destroy(ctx),
                );
                if let Err(error) = result {
                    requeue(&mut self.pending_destroy, id, batch);
                    return Err(error);
                }
                removed += self.remove_subtree(id);
                log::debug!("Entity {:?} destroyed", id);
            }
        }
        Ok(removed)
    }

    fn enter_initialize(&mut self, id: EntityId, count: &mut usize) -> Visit {
        let Some(node) = self.entities.get_mut(id) else {
            return Visit::Prune;
        };
        if node.initialized || node.state != EntityState::Pending {
            return Visit::SkipComponents;
        }
        node.initialized = true;
        if node.destroy_requested {
            node.state = EntityState::PendingDestroy;
            self.pending_destroy.push(id);
        } else {
            node.state = EntityState::Live;
        }
        *count += 1;
        log::trace!("Initializing entity {:?}", id);
        Visit::Continue
    }

    fn enter_destroy(&mut self, id: EntityId) -> Result<Visit, SceneError> {
        let Some(node) = self.entities.get_mut(id) else {
            return Ok(Visit::Prune);
        };
        node.state = EntityState::PendingDestroy;
        if !node.initialized {
            // Joined a dying subtree before its first flush
            node.initialized = true;
            self.visit_components(id, &mut |component, ctx| component.initialize(ctx))?;
        }
        Ok(Visit::Continue)
    }

    /// Queued for destruction and not covered by a queued ancestor
    fn is_destroy_root(&self, id: EntityId) -> bool {
        let Some(node) = self.entities.get(id) else {
            return false;
        };
        if node.state != EntityState::PendingDestroy {
            return false;
        }
        !node
            .parent
            .and_then(|parent| self.entities.get(parent))
            .is_some_and(|parent| parent.state == EntityState::PendingDestroy)
    }

    fn update_live(&mut self) -> Result<(), SceneError> {
        let roots = self.roots.clone();
        for root in roots {
            let is_live_root = self
                .entities
                .get(root)
                .is_some_and(|node| node.parent.is_none() && node.state == EntityState::Live);
            if !is_live_root {
                continue;
            }
            self.for_each_in_subtree(
                root,
                true,
                &mut |scene, entity| {
                    Ok(if scene.is_live(entity) { Visit::Continue } else { Visit::Prune })
                },
                &mut |component, ctx| component.update(ctx),
            )?;
        }
        Ok(())
    }

    fn clamp_delta(&self, unscaled_delta: f32) -> f32 {
        if !unscaled_delta.is_finite() {
            return 0.0;
        }
        unscaled_delta.clamp(0.0, self.config.max_delta_time.max(0.0))
    }

    fn update_stats(&mut self, initialized: usize, destroyed: usize, phases: [Duration; 3]) {
        let [initialize_time, destroy_time, update_time] = phases;
        let micros = |d: Duration| u64::try_from(d.as_micros()).unwrap_or(u64::MAX);
        self.stats = SceneStats {
            frame: self.time.frame(),
            initialized,
            destroyed,
            live_count: self.live_count(),
            pending_count: self.pending_count(),
            initialize_time_us: micros(initialize_time),
            destroy_time_us: micros(destroy_time),
            update_time_us: micros(update_time),
        };
        log::trace!(
            "Frame {}: +{} -{} live={} ({}us)",
            self.stats.frame,
            initialized,
            destroyed,
            self.stats.live_count,
            self.stats.total_frame_time_us()
        );
    }
}

/// Put `failed` and the unprocessed `rest` ahead of anything queued since
fn requeue(queue: &mut Vec<EntityId>, failed: EntityId, rest: impl Iterator<Item = EntityId>) {
    let mut retry: Vec<EntityId> = std::iter::once(failed).chain(rest).collect();
    retry.append(queue);
    *queue = retry;
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.entities.len())
            .field("roots", &self.roots)
            .field("pending_add", &self.pending_add)
            .field("pending_destroy", &self.pending_destroy)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);
    impl Component for Health {}

    #[test]
    fn test_add_entity_twice_fails() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        scene.add_entity(entity).unwrap();
        assert_eq!(scene.state(entity).unwrap(), EntityState::Pending);
        assert_eq!(scene.add_entity(entity), Err(SceneError::AlreadyAdded(entity)));

        scene.run_frame(0.0).unwrap();
        assert_eq!(scene.state(entity).unwrap(), EntityState::Live);
        assert_eq!(scene.add_entity(entity), Err(SceneError::AlreadyAdded(entity)));
    }

    #[test]
    fn test_get_component_absent_is_not_found() {
        let mut scene = Scene::new();
        let entity = scene.spawn();

        assert_eq!(
            scene.get_component::<Health>(entity),
            Err(SceneError::ComponentNotFound { entity, kind: ComponentKind::of::<Health>() })
        );
        assert!(scene.try_get_component::<Health>(entity).is_none());
        assert!(scene.try_get_component_mut::<Health>(entity).is_none());
    }

    #[test]
    fn test_attach_overwrites_and_returns_old() {
        let mut scene = Scene::new();
        let entity = scene.spawn();

        assert!(scene.attach_component(entity, Health(10)).unwrap().is_none());
        let old = scene.attach_component(entity, Health(20)).unwrap();
        assert_eq!(old.map(|h| *h), Some(Health(10)));
        assert_eq!(scene.get_component::<Health>(entity), Ok(&Health(20)));
        assert_eq!(scene.node(entity).unwrap().components().len(), 1);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut scene = Scene::new();
        let entity = scene.spawn();
        scene.attach_component(entity, Health(1)).unwrap();

        assert_eq!(scene.detach_component::<Health>(entity).unwrap().map(|h| *h), Some(Health(1)));
        assert!(scene.detach_component::<Health>(entity).unwrap().is_none());
        assert!(!scene.has_component::<Health>(entity));
    }

    #[test]
    fn test_components_of_kind_skips_detached() {
        let mut scene = Scene::new();
        let a = scene.spawn();
        let b = scene.spawn();
        let loose = scene.spawn();
        for (entity, hp) in [(a, 1), (b, 2), (loose, 3)] {
            scene.attach_component(entity, Health(hp)).unwrap();
        }
        scene.add_entity(a).unwrap();
        scene.add_entity(b).unwrap();

        let mut found: Vec<_> = scene.components_of_kind::<Health>().map(|(_, h)| h.0).collect();
        found.sort_unstable();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn test_components_in_subtree_is_parent_first() {
        let mut scene = Scene::new();
        let root = scene.spawn();
        let child = scene.spawn();
        let grandchild = scene.spawn();
        scene.add_child(root, child).unwrap();
        scene.add_child(child, grandchild).unwrap();
        scene.attach_component(grandchild, Health(3)).unwrap();
        scene.attach_component(root, Health(1)).unwrap();

        let found: Vec<_> = scene
            .components_in_subtree::<Health>(root)
            .unwrap()
            .map(|(id, h)| (id, h.0))
            .collect();
        assert_eq!(found, vec![(root, 1), (grandchild, 3)]);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut scene = Scene::with_config(SceneConfig {
            max_delta_time: 0.5,
            ..SceneConfig::default()
        });
        scene.run_frame(10.0).unwrap();
        assert_eq!(scene.time().unscaled_delta(), 0.5);
        scene.run_frame(f32::NAN).unwrap();
        assert_eq!(scene.time().unscaled_delta(), 0.0);
        scene.run_frame(-1.0).unwrap();
        assert_eq!(scene.time().unscaled_delta(), 0.0);
        assert_eq!(scene.time().frame(), 3);
    }

    #[test]
    fn test_find_by_name() {
        let mut scene = Scene::new();
        let ship = scene.spawn_named("ship");
        scene.spawn_named("rock");
        assert_eq!(scene.find_by_name("ship"), Some(ship));
        assert_eq!(scene.name(ship).unwrap(), Some("ship"));
        assert_eq!(scene.find_by_name("ufo"), None);
    }

    #[test]
    fn test_stats_track_flushes() {
        let mut scene = Scene::new();
        let parent = scene.spawn();
        let child = scene.spawn();
        scene.add_child(parent, child).unwrap();
        scene.add_entity(parent).unwrap();

        scene.run_frame(0.25).unwrap();
        assert_eq!(scene.stats().initialized, 2);
        assert_eq!(scene.stats().live_count, 2);

        scene.destroy(parent).unwrap();
        scene.run_frame(0.25).unwrap();
        assert_eq!(scene.stats().destroyed, 2);
        assert_eq!(scene.stats().live_count, 0);
        assert_eq!(scene.entity_count(), 0);
    }
}
