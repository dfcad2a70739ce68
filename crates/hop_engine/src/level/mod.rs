//! Data-driven level loading
//!
//! The declarative JSON level format and the ingestion path that turns it
//! into collision geometry. The schema itself belongs to the surrounding
//! tooling; this module owns parsing and validation on the way in.

pub mod format;
pub mod loader;

pub use format::{ColliderData, LevelData, NpcSpawn};
pub use loader::{build_collision_world, load_level, parse_level, LevelError};
