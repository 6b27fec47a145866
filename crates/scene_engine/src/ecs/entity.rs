//! Entity implementation

use super::{ComponentTable, TransformCache};

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational arena key: a handle to a removed entity never aliases a
    /// newer one.
    pub struct EntityId;
}

/// Where an entity is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    /// Spawned but never added to the scene
    Detached,
    /// Queued for the next add flush
    Pending,
    /// Initialized and updated every frame
    Live,
    /// Queued for the next destroy flush
    PendingDestroy,
}

impl EntityState {
    /// Whether the entity has been added to the scene (in any later state)
    pub fn in_scene(self) -> bool {
        !matches!(self, Self::Detached)
    }
}

/// A node in the scene hierarchy
///
/// Owns its components and the list of its children. The parent link is a
/// plain handle, never an owning reference, so teardown only ever walks
/// downwards.
#[derive(Debug)]
pub struct EntityNode {
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) components: ComponentTable,
    pub(crate) transform: TransformCache,
    pub(crate) state: EntityState,
    pub(crate) initialized: bool,
    pub(crate) destroy_requested: bool,
}

impl EntityNode {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            parent: None,
            children: Vec::new(),
            components: ComponentTable::new(),
            transform: TransformCache::new(),
            state: EntityState::Detached,
            initialized: false,
            destroy_requested: false,
        }
    }

    /// Debug name, if one was given at spawn
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent handle (None for roots and detached entities)
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in update order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Component table
    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Local transform
    pub fn transform(&self) -> &TransformCache {
        &self.transform
    }

    /// Mutable local transform
    pub fn transform_mut(&mut self) -> &mut TransformCache {
        &mut self.transform
    }

    /// Lifecycle state
    pub fn state(&self) -> EntityState {
        self.state
    }

    /// Whether the add flush has run Initialize on this entity
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
