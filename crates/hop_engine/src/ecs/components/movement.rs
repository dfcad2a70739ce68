//! Movement component for entities that move through the collision world

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Linear velocity of a dynamic entity, in units per second
#[derive(Debug, Clone, Default)]
pub struct MovementComponent {
    /// Current velocity
    pub velocity: Vec3,
}

impl Component for MovementComponent {}

impl MovementComponent {
    /// Create a movement component at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a movement component with an initial velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self { velocity }
    }

    /// Current horizontal speed, ignoring the vertical component
    pub fn horizontal_speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }

    /// Stop all movement
    pub fn stop(&mut self) {
        self.velocity = Vec3::zeros();
    }
}
