//! Game configuration
//!
//! Loaded from `asteroids.toml` (or `.ron`) when present, defaults otherwise.

use scene_engine::config::{Config, ConfigError, EngineConfig};
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine loop settings
    pub engine: EngineConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Asteroids launched by the spawner
    pub asteroid_count: u32,

    /// Seconds between asteroid launches
    pub spawn_interval: f32,

    /// Asteroid speed in units per second
    pub asteroid_speed: f32,

    /// Radius of a small asteroid
    pub asteroid_radius: f32,

    /// Turret rotation speed in radians per second
    pub ship_rotation_speed: f32,

    /// Seconds between shots
    pub fire_interval: f32,

    /// Bullet speed in units per second
    pub bullet_speed: f32,

    /// Bullet lifetime in seconds
    pub bullet_lifetime: f32,

    /// Play field width
    pub world_width: f32,

    /// Play field height
    pub world_height: f32,

    /// Seed for the spawner's random stream
    pub seed: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 5,
            spawn_interval: 1.5,
            asteroid_speed: 40.0,
            asteroid_radius: 8.0,
            ship_rotation_speed: 1.5,
            fire_interval: 0.25,
            bullet_speed: 300.0,
            bullet_lifetime: 1.5,
            world_width: 640.0,
            world_height: 480.0,
            seed: 7,
        }
    }
}

impl GameConfig {
    /// Headless defaults: a fixed 60 Hz step for twenty simulated seconds
    pub fn headless() -> Self {
        let mut config = Self::default();
        config.engine.fixed_delta = Some(1.0 / 60.0);
        config.engine.max_frames = Some(1200);
        config
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        let gameplay = &self.gameplay;
        let positive = [
            ("spawn_interval", gameplay.spawn_interval),
            ("fire_interval", gameplay.fire_interval),
            ("bullet_lifetime", gameplay.bullet_lifetime),
            ("asteroid_radius", gameplay.asteroid_radius),
            ("world_width", gameplay.world_width),
            ("world_height", gameplay.world_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        Ok(())
    }
}

impl Config for GameConfig {}
