//! Scene error types

use thiserror::Error;

use crate::ecs::{ComponentKind, EntityId};

/// Errors raised by scene graph operations and component hooks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Handle does not refer to a living entity
    #[error("Entity {0:?} not found")]
    EntityNotFound(EntityId),

    /// `remove_child` called on an entity that is not the child's parent
    #[error("Entity {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Supposed parent
        parent: EntityId,
        /// Entity that was to be removed
        child: EntityId,
    },

    /// Reparenting would place an entity under itself or a descendant
    #[error("Parenting {entity:?} under {parent:?} would create a cycle")]
    CyclicHierarchy {
        /// Entity being reparented
        entity: EntityId,
        /// Requested parent
        parent: EntityId,
    },

    /// An entity that is part of the scene cannot move under a parent that is not
    #[error("Entity {entity:?} is in the scene but its new parent is not")]
    OutsideScene {
        /// Entity being reparented
        entity: EntityId,
    },

    /// `add_entity` called on an entity that is already pending or live
    #[error("Entity {0:?} has already been added to the scene")]
    AlreadyAdded(EntityId),

    /// No component of the requested kind on the entity
    #[error("Entity {entity:?} has no {kind} component")]
    ComponentNotFound {
        /// Entity that was queried
        entity: EntityId,
        /// Requested kind
        kind: ComponentKind,
    },

    /// The component is checked out by one of its own hooks
    #[error("{kind} component on {entity:?} is in use by a running hook")]
    ComponentBusy {
        /// Entity that was queried
        entity: EntityId,
        /// Requested kind
        kind: ComponentKind,
    },

    /// Failure raised by script code
    #[error("Script error: {0}")]
    Script(String),
}

impl SceneError {
    /// Build a [`SceneError::Script`] from any displayable message
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script(message.into())
    }
}
