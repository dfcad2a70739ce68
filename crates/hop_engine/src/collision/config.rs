//! Tunable collision constants
//!
//! All values change gameplay feel, not algorithm correctness. Invalid
//! configurations are rejected loudly at load time rather than tolerated
//! mid-simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when tuning values fail validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f32,
    },
    /// The solver needs at least one resolution pass
    #[error("max_iterations must be at least 1, got {0}")]
    TooFewIterations(u32),
    /// Slope threshold outside the meaningful open interval (0, 90)
    #[error("max_slope_degrees must be in (0, 90), got {0}")]
    SlopeOutOfRange(f32),
    /// A value was NaN or infinite
    #[error("{0} must be finite")]
    NotFinite(&'static str),
}

/// Configuration for the broadphase query and the resolution solver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Extra horizontal reach of the broadphase query box beyond the sphere
    /// radius
    pub query_margin: f32,

    /// How far below the sphere center the query box extends; taller than
    /// the upward margin so ground under a falling body is always found
    pub down_margin: f32,

    /// How far above the sphere center the query box extends
    pub up_margin: f32,

    /// Steepest surface angle, in degrees, still classified as walkable
    /// ground
    pub max_slope_degrees: f32,

    /// Resting-contact tolerance: both the jitter allowance for a body
    /// sitting exactly on a surface and the detection-radius enlargement for
    /// ground checks
    pub grounding_tolerance: f32,

    /// Number of resolution passes per tick. A fixed small count, not a
    /// convergence loop; the early-exit handles the common one-pass case.
    pub max_iterations: u32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            query_margin: 0.5,
            down_margin: 2.0,
            up_margin: 2.0,
            max_slope_degrees: 45.0,
            grounding_tolerance: 0.01,
            max_iterations: 3,
        }
    }
}

impl CollisionConfig {
    /// Minimum normal Y component for a contact to count as walkable ground:
    /// `cos(max_slope_degrees)`.
    pub fn min_ground_normal_y(&self) -> f32 {
        self.max_slope_degrees.to_radians().cos()
    }

    /// Validate the configuration, rejecting values that would make the
    /// solver misbehave silently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("query_margin", self.query_margin),
            ("down_margin", self.down_margin),
            ("up_margin", self.up_margin),
            ("grounding_tolerance", self.grounding_tolerance),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !self.max_slope_degrees.is_finite() {
            return Err(ConfigError::NotFinite("max_slope_degrees"));
        }
        if self.max_slope_degrees <= 0.0 || self.max_slope_degrees >= 90.0 {
            return Err(ConfigError::SlopeOutOfRange(self.max_slope_degrees));
        }
        if self.max_iterations < 1 {
            return Err(ConfigError::TooFewIterations(self.max_iterations));
        }
        Ok(())
    }
}
