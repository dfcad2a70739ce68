//! Declarative level description
//!
//! The on-disk JSON schema for a level: a spawn point, a list of box and
//! mesh colliders, and optional NPC spawns. The loader validates this data
//! and feeds it to the triangle world builder.

use serde::{Deserialize, Serialize};

fn default_rotation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_npc_radius() -> f32 {
    0.4
}

/// A complete level description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    /// Display name
    pub name: String,

    /// Player spawn position
    pub spawn: [f32; 3],

    /// Static collision geometry
    #[serde(default)]
    pub colliders: Vec<ColliderData>,

    /// NPC spawns; NPCs use the same body pipeline as the player
    #[serde(default)]
    pub npcs: Vec<NpcSpawn>,
}

/// One static collider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColliderData {
    /// An oriented box, 12 triangles
    Box {
        /// World position of the box center
        pos: [f32; 3],
        /// Euler rotation in degrees, YXZ intrinsic order
        #[serde(default = "default_rotation")]
        rot: [f32; 3],
        /// Per-axis scale
        #[serde(default = "default_scale")]
        scale: [f32; 3],
        /// Full extents along each local axis
        size: [f32; 3],
    },
    /// An arbitrary triangle mesh, already triangulated by the exporter
    Mesh {
        /// World position of the mesh origin
        pos: [f32; 3],
        /// Euler rotation in degrees, YXZ intrinsic order
        #[serde(default = "default_rotation")]
        rot: [f32; 3],
        /// Per-axis scale
        #[serde(default = "default_scale")]
        scale: [f32; 3],
        /// Local-space vertex positions
        vertices: Vec<[f32; 3]>,
        /// Triangle index triples into `vertices`
        faces: Vec<[u32; 3]>,
    },
}

/// Spawn description for one NPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcSpawn {
    /// Spawn position
    pub pos: [f32; 3],
    /// Collision sphere radius
    #[serde(default = "default_npc_radius")]
    pub radius: f32,
    /// Display name
    #[serde(default)]
    pub name: String,
}
