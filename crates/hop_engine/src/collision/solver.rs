//! Sphere-vs-world resolution solver
//!
//! The core of the movement feel: a multi-pass positional-correction solver
//! that classifies contacts into walkable ground, steep slopes, and walls,
//! and keeps a dynamic body resting on geometry without jitter.
//!
//! Positional correction (rather than impulse resolution) is sufficient
//! because bodies are plain spheres against static geometry only; there are
//! no body-body dynamics and no restitution.

use super::config::CollisionConfig;
use super::primitives::{sphere_vs_triangle, Contact};
use super::world::CollisionWorld;
use crate::foundation::math::Vec3;

/// Minimum normal Y component for a non-walkable contact to still count as a
/// slideable steep slope rather than a wall or ceiling.
pub const STEEP_SLOPE_MIN_Y: f32 = 0.1;

/// The collision state of a moving sphere (the player, and structurally
/// identical NPCs)
///
/// `grounded`, `ground_normal`, and `steep_slope` are derived state,
/// recomputed from scratch by every [`resolve_body`] call. Nothing outside
/// the solver writes them, except the respawn flow via [`DynamicBody::reset`].
#[derive(Debug, Clone)]
pub struct DynamicBody {
    /// Collision sphere radius
    pub radius: f32,
    /// Whether the body rests on walkable ground this tick
    pub grounded: bool,
    /// Normal of the governing ground contact; `+Y` when airborne
    pub ground_normal: Vec3,
    /// Normal of the steepest slideable surface touched this tick, if the
    /// body is not grounded
    pub steep_slope: Option<Vec3>,
}

impl DynamicBody {
    /// Create a body with the given collision radius.
    ///
    /// A non-positive or non-finite radius is a programming error and is
    /// rejected immediately rather than tolerated mid-simulation.
    pub fn new(radius: f32) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "body radius must be positive and finite, got {radius}"
        );
        Self {
            radius,
            grounded: false,
            ground_normal: Vec3::y(),
            steep_slope: None,
        }
    }

    /// Reset derived contact state to neutral (the respawn flow).
    pub fn reset(&mut self) {
        self.grounded = false;
        self.ground_normal = Vec3::y();
        self.steep_slope = None;
    }
}

/// Resolve one dynamic body against the collision world for this tick.
///
/// Runs up to `config.max_iterations` passes over the broadphase candidates.
/// Each pass:
///
/// - tests the sphere with a detection radius enlarged by
///   `grounding_tolerance`, so a body resting exactly on a surface stays
///   classified as grounded without visible jitter;
/// - pushes the position out along the contact normal by
///   `depth - grounding_tolerance` when truly penetrating;
/// - classifies each contact: walkable ground candidates compete by highest
///   contact point (so an overlapping lower triangle cannot win grounding
///   from the one that would place the body highest), while wall and steep
///   contacts immediately zero the inward velocity component; walls deflect
///   even while the body is grounded.
///
/// After each pass the winning ground candidate sets `grounded` and projects
/// any remaining into-surface velocity along the ground normal; failing
/// that, the steepest slideable contact is recorded for slide-down motion.
/// A pass with no contacts ends the loop early; most ticks resolve in one.
pub fn resolve_body(
    world: &CollisionWorld,
    config: &CollisionConfig,
    body: &mut DynamicBody,
    position: &mut Vec3,
    velocity: &mut Vec3,
) {
    body.reset();

    let candidates = world.query_near(*position, body.radius, config, Some(*velocity));
    if candidates.is_empty() {
        return;
    }

    let detection_radius = body.radius + config.grounding_tolerance;
    let min_ground_y = config.min_ground_normal_y();

    for _ in 0..config.max_iterations {
        let mut had_collision = false;
        let mut ground: Option<Contact> = None;
        let mut steepest: Option<Contact> = None;

        for &triangle in &candidates {
            let Some(contact) = sphere_vs_triangle(*position, detection_radius, triangle) else {
                continue;
            };
            had_collision = true;

            // Truly penetrating, not just inside the resting tolerance.
            if contact.depth > config.grounding_tolerance {
                *position += contact.normal * (contact.depth - config.grounding_tolerance);
            }

            if contact.normal.y >= min_ground_y {
                if ground.map_or(true, |g| contact.point.y > g.point.y) {
                    ground = Some(contact);
                }
            } else {
                let into = velocity.dot(&contact.normal).min(0.0);
                *velocity -= contact.normal * into;
                if contact.normal.y > STEEP_SLOPE_MIN_Y
                    && steepest.map_or(true, |s| contact.point.y > s.point.y)
                {
                    steepest = Some(contact);
                }
            }
        }

        if let Some(g) = ground {
            body.grounded = true;
            body.ground_normal = g.normal;
            body.steep_slope = None;
            let into = velocity.dot(&g.normal).min(0.0);
            *velocity -= g.normal * into;
        } else if let Some(s) = steepest {
            body.steep_slope = Some(s.normal);
        }

        if !had_collision {
            break;
        }
    }
}
