//! Transform component
//!
//! Pure data component for world-space position, orientation, and scale.
//! Rotation is stored as Euler degrees in YXZ intrinsic order (yaw, pitch,
//! roll), the same convention the collision builder and renderer share.

use crate::ecs::Component;
use crate::foundation::math::{euler_to_matrix, Vec3};

/// World-space spatial transform (Y-up, right-handed)
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position in world space
    pub position: Vec3,

    /// Rotation as Euler degrees, YXZ intrinsic order (yaw = Y, pitch = X,
    /// roll = Z)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// The yaw angle in degrees
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Unit forward vector derived from the full rotation
    pub fn forward(&self) -> Vec3 {
        euler_to_matrix(self.rotation) * Vec3::z()
    }
}
