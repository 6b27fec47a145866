//! Configuration system
//!
//! Scene and engine settings, loadable from TOML or RON files.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Load configuration from file, or fall back to defaults if the file does not exist
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if std::path::Path::new(path).exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its valid range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Scene coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Initial time scale applied to scaled delta time
    pub time_scale: f32,

    /// Largest unscaled delta accepted for one frame, in seconds
    ///
    /// Longer stalls (debugger breaks, window drags) are clamped to this.
    pub max_delta_time: f32,

    /// Collect per-phase frame statistics
    pub enable_stats: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
            enable_stats: true,
        }
    }
}

impl SceneConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_scale >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "time_scale",
                reason: format!("must be non-negative, got {}", self.time_scale),
            });
        }
        if !(self.max_delta_time > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_delta_time",
                reason: format!("must be positive, got {}", self.max_delta_time),
            });
        }
        Ok(())
    }
}

impl Config for SceneConfig {}

/// Headless engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Scene coordinator settings
    pub scene: SceneConfig,

    /// Stop the main loop after this many frames (None = until quit)
    pub max_frames: Option<u64>,

    /// Use a fixed delta per frame instead of measured wall-clock time
    pub fixed_delta: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            max_frames: None,
            fixed_delta: None,
        }
    }
}

impl EngineConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        if let Some(delta) = self.fixed_delta {
            if !(delta > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "fixed_delta",
                    reason: format!("must be positive, got {}", delta),
                });
            }
        }
        Ok(())
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        let dir = std::env::temp_dir();
        dir.join(format!("scene_engine_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "max_frames = 120\n[scene]\ntime_scale = 0.5\n").unwrap();

        let config = EngineConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.max_frames, Some(120));
        assert_eq!(config.scene.time_scale, 0.5);
        assert_eq!(config.scene.max_delta_time, SceneConfig::default().max_delta_time);
        assert_eq!(config.fixed_delta, None);
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = temp_path("scene.ron");
        let config = SceneConfig {
            time_scale: 2.0,
            max_delta_time: 0.1,
            enable_stats: false,
        };
        config.save_to_file(&path).unwrap();
        let loaded = SceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SceneConfig::default().save_to_file(&temp_path("scene.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = SceneConfig::load_or_default(&temp_path("missing.toml")).unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_validation() {
        let mut config = EngineConfig::default();
        assert!(config.validate().is_ok());

        config.fixed_delta = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "fixed_delta", .. })));

        config.fixed_delta = None;
        config.scene.max_delta_time = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "max_delta_time", .. })));
    }
}
