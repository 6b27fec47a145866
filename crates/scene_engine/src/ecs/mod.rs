//! Entity and component building blocks
//!
//! Entities are nodes in the [`Scene`](crate::scene::Scene) arena. Each one
//! owns a [`ComponentTable`] (at most one instance per component kind) and a
//! [`TransformCache`]. Graph and lifecycle operations live on the scene.

pub mod entity;
pub mod component;
pub mod storage;
pub mod transform;

pub use entity::{EntityId, EntityNode, EntityState};
pub use component::{AsAny, Component, ComponentKind};
pub use storage::ComponentTable;
pub use transform::TransformCache;
