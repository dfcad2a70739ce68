//! Game tuning configuration
//!
//! All gameplay-feel constants in one TOML-loadable structure. Validation is
//! loud and happens once at load time; the simulation never re-checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hop_engine::collision::{CollisionConfig, ConfigError};
use hop_engine::motion::MotionConfig;

/// Errors produced while loading the tuning file
#[derive(Error, Debug)]
pub enum GameConfigError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML was malformed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// A tuning value failed validation
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Collision solver and broadphase tuning
    pub collision: CollisionConfig,

    /// Movement and gravity tuning
    pub motion: MotionConfig,

    /// Player collision sphere radius
    pub player_radius: f32,

    /// Bodies falling below this height are respawned
    pub kill_plane_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            collision: CollisionConfig::default(),
            motion: MotionConfig::default(),
            player_radius: 0.4,
            kill_plane_y: -25.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate tuning from TOML text. Missing sections keep their
    /// defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, GameConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collision.validate()?;
        self.motion.validate()?;
        if !self.player_radius.is_finite() {
            return Err(ConfigError::NotFinite("player_radius"));
        }
        if self.player_radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "player_radius",
                value: self.player_radius,
            });
        }
        if !self.kill_plane_y.is_finite() {
            return Err(ConfigError::NotFinite("kill_plane_y"));
        }
        Ok(())
    }
}
