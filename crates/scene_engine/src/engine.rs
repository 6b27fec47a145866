//! Headless engine host
//!
//! Owns the [`Scene`] and drives it frame by frame with either measured
//! wall-clock time or a fixed delta. Rendering, physics and input are the
//! application's business; they can be exposed to components as scene
//! resources.

use crate::{
    application::Application,
    config::{ConfigError, EngineConfig},
    ecs::EntityId,
    foundation::time::Timer,
    scene::{Scene, SceneError, SceneFactory},
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the scene and manages the main loop.
pub struct Engine {
    /// Scene coordinator
    scene: Scene,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,

    /// Frames stepped so far
    frames: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        Ok(Self {
            scene: Scene::with_config(config.scene.clone()),
            timer: Timer::new(),
            config,
            running: true,
            frames: 0,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;
        engine.run_app(app)
    }

    /// Run the main loop on this engine until quit or the frame limit
    pub fn run_app<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        self.timer.reset_frame();

        while self.running && !self.frame_limit_reached() {
            let delta_time = self.next_delta();

            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            self.step(delta_time)?;
        }

        app.cleanup(self);

        log::info!("Engine shutdown complete after {} frames", self.frames);
        Ok(())
    }

    /// Run a single scene frame
    pub fn step(&mut self, delta_time: f32) -> Result<(), EngineError> {
        self.scene.run_frame(delta_time)?;
        self.frames += 1;
        Ok(())
    }

    /// Replace the scene with a fresh one seeded by `factory`
    pub fn load_scene(&mut self, factory: &mut dyn SceneFactory) -> Result<Vec<EntityId>, EngineError> {
        let mut scene = Scene::with_config(self.config.scene.clone());
        let roots = scene.load_from(factory)?;
        self.scene = scene;
        log::info!("Scene loaded with {} root entities", roots.len());
        Ok(roots)
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get mutable access to the scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Frames stepped so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn frame_limit_reached(&self) -> bool {
        self.config.max_frames.is_some_and(|max| self.frames >= max)
    }

    fn next_delta(&mut self) -> f32 {
        match self.config.fixed_delta {
            Some(delta) => delta,
            None => {
                self.timer.update();
                self.timer.delta_time()
            }
        }
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A scene operation or component hook failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::config::SceneConfig;
    use crate::ecs::Component;
    use crate::scene::{EntityBlueprint, FrameContext, SceneSeed};

    struct Frames(u32);

    impl Component for Frames {
        fn update(&mut self, _ctx: &mut FrameContext<'_>) -> Result<(), SceneError> {
            self.0 += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Counting {
        updates: u32,
        quit_after: Option<u32>,
        cleaned_up: bool,
        root: Option<EntityId>,
    }

    impl SceneFactory for Counting {
        fn create_scene(&mut self) -> Result<SceneSeed, SceneError> {
            Ok(SceneSeed::default().with_entity(EntityBlueprint::named("counter").with_component(Frames(0))))
        }
    }

    impl Application for Counting {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.root = engine.load_scene(self)?.first().copied();
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
            assert_eq!(delta_time, 0.5);
            self.updates += 1;
            if self.quit_after == Some(self.updates) {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    fn fixed_config(max_frames: Option<u64>) -> EngineConfig {
        EngineConfig {
            scene: SceneConfig {
                max_delta_time: 1.0,
                ..SceneConfig::default()
            },
            max_frames,
            fixed_delta: Some(0.5),
        }
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut engine = Engine::new(fixed_config(Some(5))).unwrap();
        let mut app = Counting::default();
        engine.run_app(&mut app).unwrap();

        assert_eq!(app.updates, 5);
        assert_eq!(engine.frame_count(), 5);
        assert!(app.cleaned_up);

        let root = app.root.unwrap();
        assert_eq!(engine.scene().get_component::<Frames>(root).map(|f| f.0), Ok(5));
        assert_eq!(engine.scene().time().total(), 2.5);
    }

    #[test]
    fn test_quit_ends_loop() {
        let mut engine = Engine::new(fixed_config(None)).unwrap();
        let mut app = Counting {
            quit_after: Some(3),
            ..Counting::default()
        };
        engine.run_app(&mut app).unwrap();
        assert_eq!(engine.frame_count(), 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            fixed_delta: Some(-1.0),
            ..EngineConfig::default()
        };
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }
}
