//! Gravity, input-to-velocity mapping, and Euler integration
//!
//! Thin glue around the solver. The pipeline per tick is fixed: input sets
//! horizontal velocity and jumps, gravity accelerates airborne bodies,
//! integration moves the transform, and the collision solver immediately
//! corrects whatever penetration the plain Euler step produced.

use serde::{Deserialize, Serialize};

use crate::collision::{ConfigError, DynamicBody};
use crate::ecs::components::{MovementComponent, TransformComponent};
use crate::foundation::math::{euler_to_matrix, Vec3};

/// Tunable motion constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Downward acceleration while airborne, units per second squared
    pub gravity: f32,

    /// Cap on downward speed; without it a long fall tunnels through thin
    /// geometry in a single integration step
    pub terminal_velocity: f32,

    /// Horizontal run speed, units per second
    pub move_speed: f32,

    /// Initial upward speed of a jump
    pub jump_speed: f32,

    /// Downhill acceleration applied while resting against a steep slope
    pub slide_acceleration: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            terminal_velocity: 40.0,
            move_speed: 8.0,
            jump_speed: 12.0,
            slide_acceleration: 18.0,
        }
    }
}

impl MotionConfig {
    /// Validate the configuration; every constant must be positive and
    /// finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("move_speed", self.move_speed),
            ("jump_speed", self.jump_speed),
            ("slide_acceleration", self.slide_acceleration),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// One tick's worth of player intent, already decoded from whatever input
/// device produced it
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Strafe axis, -1..1, positive to the right
    pub move_x: f32,
    /// Forward axis, -1..1, positive ahead
    pub move_z: f32,
    /// Facing yaw in degrees
    pub yaw_deg: f32,
    /// Jump requested this tick
    pub jump: bool,
}

impl InputState {
    /// No movement, no jump, facing unchanged from the given yaw
    pub fn idle(yaw_deg: f32) -> Self {
        Self {
            yaw_deg,
            ..Default::default()
        }
    }
}

/// Map input to horizontal velocity and jumps.
///
/// The move axes are rotated by the facing yaw, normalized so diagonals are
/// not faster, and scaled to the run speed. A jump fires only when grounded
/// and clears grounding immediately, so stale grounded state from the
/// previous tick can never produce a double jump.
pub fn apply_input(
    input: &InputState,
    config: &MotionConfig,
    transform: &mut TransformComponent,
    movement: &mut MovementComponent,
    body: &mut DynamicBody,
) {
    transform.rotation.y = input.yaw_deg;

    let yaw_only = euler_to_matrix(Vec3::new(0.0, input.yaw_deg, 0.0));
    let mut wish = yaw_only * Vec3::new(input.move_x, 0.0, input.move_z);
    let len = wish.magnitude();
    if len > 1.0 {
        wish /= len;
    }

    movement.velocity.x = wish.x * config.move_speed;
    movement.velocity.z = wish.z * config.move_speed;

    if input.jump && body.grounded {
        movement.velocity.y = config.jump_speed;
        body.grounded = false;
    }
}

/// Apply gravity and steep-slope sliding to an airborne body.
///
/// Grounded bodies are left alone; the solver has already projected their
/// velocity onto the ground plane. Downward speed is clamped to the terminal
/// velocity.
pub fn apply_gravity(config: &MotionConfig, movement: &mut MovementComponent, body: &DynamicBody, dt: f32) {
    if body.grounded {
        return;
    }

    movement.velocity.y -= config.gravity * dt;
    if movement.velocity.y < -config.terminal_velocity {
        movement.velocity.y = -config.terminal_velocity;
    }

    if let Some(normal) = body.steep_slope {
        // Accelerate along gravity projected onto the slope plane.
        let down = Vec3::new(0.0, -1.0, 0.0);
        let along = down - normal * down.dot(&normal);
        if along.magnitude_squared() > 1e-8 {
            movement.velocity += along.normalize() * config.slide_acceleration * dt;
        }
    }
}

/// Plain explicit Euler integration.
///
/// Acceptable because the collision solver runs every tick immediately
/// afterwards and corrects any resulting penetration.
pub fn integrate(transform: &mut TransformComponent, movement: &MovementComponent, dt: f32) {
    transform.position += movement.velocity * dt;
}
