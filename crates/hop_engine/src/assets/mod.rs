//! Asset ingestion for the simulation core
//!
//! Only collision-relevant parsing lives here; visual asset streaming is an
//! external collaborator.

pub mod obj;

pub use obj::{load_obj, parse_obj_str, MeshData, ObjError};
