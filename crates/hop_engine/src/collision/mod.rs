//! Unified triangle collision engine
//!
//! The one subsystem with real algorithmic depth: geometric primitives, the
//! triangle world builder, the AABB broadphase, and the multi-pass
//! sphere-vs-world resolution solver.

pub mod config;
pub mod primitives;
pub mod solver;
pub mod world;

pub use config::{CollisionConfig, ConfigError};
pub use primitives::{closest_point_on_triangle, sphere_vs_triangle, Aabb, Contact, Triangle};
pub use solver::{resolve_body, DynamicBody, STEEP_SLOPE_MIN_Y};
pub use world::{box_triangles, CollisionWorld};
