//! # Hop Engine
//!
//! Simulation core for a 3rd-person 3D platformer: a unified triangle
//! collision world with a sphere-vs-world resolution solver, data-driven
//! level loading, and the motion glue that ties them into a fixed-order
//! simulation tick.
//!
//! ## Subsystems
//!
//! - **Collision**: preprocessed triangle soup, AABB broadphase, and the
//!   multi-pass positional-correction solver that produces grounding and
//!   slope state
//! - **ECS**: generational entities and dense per-kind component storages
//! - **Level**: declarative JSON colliders validated into the collision world
//! - **Motion**: gravity, input mapping, jumping, and Euler integration
//!
//! Rendering, asset streaming, input devices, and the multiplayer relay are
//! external collaborators; they consume this crate's state and never reach
//! into the tick.
//!
//! ## Quick Start
//!
//! ```rust
//! use hop_engine::prelude::*;
//!
//! let config = CollisionConfig::default();
//! let mut world = CollisionWorld::with_config(&config);
//! world.add_box_collider(
//!     Vec3::zeros(),
//!     Vec3::zeros(),
//!     Vec3::new(1.0, 1.0, 1.0),
//!     Vec3::new(4.0, 1.0, 4.0),
//! );
//!
//! let mut body = DynamicBody::new(0.4);
//! let mut position = Vec3::new(0.0, 0.6, 0.0);
//! let mut velocity = Vec3::new(0.0, -5.0, 0.0);
//! resolve_body(&world, &config, &mut body, &mut position, &mut velocity);
//! assert!(body.grounded);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod collision;
pub mod ecs;
pub mod foundation;
pub mod level;
pub mod motion;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{parse_obj_str, MeshData},
        collision::{
            resolve_body, CollisionConfig, CollisionWorld, ConfigError, Contact, DynamicBody,
            Triangle,
        },
        ecs::{
            components::{MovementComponent, TransformComponent},
            Component, ComponentStorage, Entities, Entity,
        },
        foundation::{
            math::{Mat3, Vec3},
            time::{clamp_dt, FrameClock, MAX_TICK_SECONDS},
        },
        level::{build_collision_world, load_level, parse_level, LevelData, LevelError},
        motion::{apply_gravity, apply_input, integrate, InputState, MotionConfig},
    };
}
