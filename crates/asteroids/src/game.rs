//! Scene setup and the application loop hooks

use scene_engine::prelude::*;

use crate::components::{Playfield, ScreenBounds, Score};
use crate::config::GameConfig;
use crate::scripts::{ShipScript, SpawnerScript};

/// Offset of the muzzle from the ship centre
const MUZZLE_OFFSET: f32 = 12.0;

/// Headless asteroids game
pub struct AsteroidsGame {
    config: GameConfig,
    final_score: Option<Score>,
}

impl AsteroidsGame {
    /// Create a game from configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            final_score: None,
        }
    }

    /// Score captured at cleanup
    pub fn final_score(&self) -> Option<&Score> {
        self.final_score.as_ref()
    }

    fn bounds(&self) -> ScreenBounds {
        ScreenBounds::centered(self.config.gameplay.world_width, self.config.gameplay.world_height)
    }
}

impl SceneFactory for AsteroidsGame {
    fn create_scene(&mut self) -> Result<SceneSeed, SceneError> {
        let gameplay = &self.config.gameplay;
        let layout = LayoutHints {
            world_size: Some(Vec2::new(gameplay.world_width, gameplay.world_height)),
            ..LayoutHints::default()
        };

        let ship = EntityBlueprint::named("ship")
            .with_script(ShipScript {
                rotation_speed: gameplay.ship_rotation_speed,
                fire_interval: gameplay.fire_interval,
                bullet_speed: gameplay.bullet_speed,
                bullet_lifetime: gameplay.bullet_lifetime,
            })
            .with_child(EntityBlueprint::named("muzzle").at(Vec2::new(MUZZLE_OFFSET, 0.0)));

        let spawner = EntityBlueprint::named("spawner").with_script(SpawnerScript::new(
            gameplay.seed,
            gameplay.asteroid_count,
            gameplay.spawn_interval,
            gameplay.asteroid_speed,
        ));

        Ok(SceneSeed::new(layout).with_entity(ship).with_entity(spawner))
    }
}

impl Application for AsteroidsGame {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing asteroids...");
        let roots = engine.load_scene(self)?;

        let scene = engine.scene_mut();
        scene.insert_resource(Playfield {
            bounds: self.bounds(),
            asteroid_radius: self.config.gameplay.asteroid_radius,
        });
        scene.insert_resource(Score::default());

        log::info!("Loaded {} root entities", roots.len());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        let frame = engine.frame_count();
        if frame > 0 && frame % 300 == 0 {
            if let Some(score) = engine.scene().resource::<Score>() {
                log::info!(
                    "Frame {}: {} points, {} live entities",
                    frame,
                    score.points,
                    engine.scene().live_count()
                );
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let scene = engine.scene();
        let stats = scene.stats();
        log::info!(
            "Simulation ended after {} frames ({} live, {} initialized last frame)",
            engine.frame_count(),
            stats.live_count,
            stats.initialized
        );
        self.final_score = scene.resource::<Score>().cloned();
    }
}
