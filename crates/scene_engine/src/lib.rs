//! # Scene Engine
//!
//! Entity/component scene graph with a deferred lifecycle and cooperative
//! script coroutines, for single-threaded 2D games.
//!
//! ## Features
//!
//! - **Scene Graph**: arena-backed hierarchy with lazily cached local transforms
//! - **Deferred Lifecycle**: additions and destructions are applied between frames
//! - **Scripts**: per-entity behaviour with initialize/update/destroy hooks
//! - **Coroutines**: resumable routines parked on frame or time awaiters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct Spinner;
//!
//! impl Script for Spinner {
//!     fn update(&mut self, ctx: &mut ScriptContext<'_, '_, Self>) -> Result<(), SceneError> {
//!         let delta = ctx.delta_time();
//!         ctx.transform_mut()?.rotate(delta);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = Scene::new();
//!     let entity = scene.spawn_named("spinner");
//!     scene.attach_script(entity, Spinner)?;
//!     scene.add_entity(entity)?;
//!
//!     for _ in 0..60 {
//!         scene.run_frame(1.0 / 60.0)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod scene;
pub mod script;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, EngineConfig, SceneConfig},
        ecs::{Component, ComponentKind, EntityId, EntityState, TransformCache},
        foundation::{
            math::{Mat3, Transform2D, Vec2},
            time::{FrameTime, Stopwatch, Timer},
        },
        scene::{
            EntityBlueprint, FrameContext, LayoutHints, Scene, SceneError, SceneFactory, SceneSeed,
            Visit,
        },
        script::{
            Awaiter, Coroutine, CoroutineState, Script, ScriptContext, ScriptHost, Sequence,
        },
        AppError, Application, Engine, EngineError,
    };
}
