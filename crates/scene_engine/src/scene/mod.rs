//! Scene graph and lifecycle coordination
//!
//! [`Scene`] owns every entity and drives the per-frame lifecycle:
//! pending entities are initialized, destroyed ones are torn down, and the
//! live hierarchy is updated parent first.

pub mod error;
pub mod context;
pub mod scene_graph;
pub mod scene_manager;
pub mod factory;

#[cfg(test)]
mod tests;

pub use error::SceneError;
pub use context::{FrameContext, Resources};
pub use scene_graph::Visit;
pub use scene_manager::{Scene, SceneStats};
pub use factory::{EntityBlueprint, LayoutHints, SceneFactory, SceneSeed};
