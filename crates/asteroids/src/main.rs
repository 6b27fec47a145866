//! Headless asteroids simulation
//!
//! A rotating turret shoots at waves of asteroids that split when hit.
//! Runs at a fixed step for a bounded number of frames and logs the score.

mod components;
mod config;
mod game;
mod scripts;

use scene_engine::{config::Config, foundation::logging, Engine};

use crate::config::GameConfig;
use crate::game::AsteroidsGame;

const CONFIG_PATH: &str = "asteroids.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_filter("info");

    log::info!("Starting asteroids...");
    let config = if std::path::Path::new(CONFIG_PATH).exists() {
        GameConfig::load_from_file(CONFIG_PATH)?
    } else {
        GameConfig::headless()
    };
    config.validate()?;

    let mut game = AsteroidsGame::new(config.clone());
    Engine::run(config.engine, &mut game)?;

    if let Some(score) = game.final_score() {
        log::info!(
            "Final score: {} points, {} asteroids destroyed, {} shots fired",
            score.points,
            score.asteroids_destroyed,
            score.shots_fired
        );
    }
    Ok(())
}
