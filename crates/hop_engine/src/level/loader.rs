//! Level ingestion
//!
//! Parses and validates the declarative JSON format, then populates a
//! [`CollisionWorld`]. All failures are explicit error values for the
//! orchestrator to handle; nothing in here panics on bad data.

use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use super::format::{ColliderData, LevelData};
use crate::collision::{CollisionConfig, CollisionWorld};
use crate::foundation::math::Vec3;

/// Errors produced while loading a level
#[derive(Error, Debug)]
pub enum LevelError {
    /// The level file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The level JSON was malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A box collider had a zero or negative size component
    #[error("collider {index} has non-positive size {size:?}")]
    InvalidBoxSize {
        /// Position of the collider in the level's collider list
        index: usize,
        /// The rejected size
        size: [f32; 3],
    },
    /// A mesh face indexed past the end of its vertex list
    #[error("collider {index}, face {face}: vertex index {vertex} out of range (mesh has {count} vertices)")]
    FaceIndexOutOfRange {
        /// Position of the collider in the level's collider list
        index: usize,
        /// Offending face index
        face: usize,
        /// Offending vertex index
        vertex: u32,
        /// Number of vertices in the mesh
        count: usize,
    },
}

/// Parse a level from JSON text.
pub fn parse_level(json: &str) -> Result<LevelData, LevelError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a level file.
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<LevelData, LevelError> {
    parse_level(&fs::read_to_string(path)?)
}

/// Validate a level's colliders and build the collision world from them.
///
/// Validation happens here, at the ingestion boundary; the triangle builder
/// itself assumes well-formed input.
pub fn build_collision_world(
    level: &LevelData,
    config: &CollisionConfig,
) -> Result<CollisionWorld, LevelError> {
    let mut world = CollisionWorld::with_config(config);

    for (index, collider) in level.colliders.iter().enumerate() {
        match collider {
            ColliderData::Box { pos, rot, scale, size } => {
                if size.iter().any(|&s| !(s > 0.0)) {
                    return Err(LevelError::InvalidBoxSize { index, size: *size });
                }
                world.add_box_collider(vec3(*pos), vec3(*rot), vec3(*scale), vec3(*size));
            }
            ColliderData::Mesh { pos, rot, scale, vertices, faces } => {
                for (face, triple) in faces.iter().enumerate() {
                    if let Some(&vertex) = triple.iter().find(|&&i| i as usize >= vertices.len()) {
                        return Err(LevelError::FaceIndexOutOfRange {
                            index,
                            face,
                            vertex,
                            count: vertices.len(),
                        });
                    }
                }
                let local: Vec<Vec3> = vertices.iter().map(|&v| vec3(v)).collect();
                world.add_mesh_collider(vec3(*pos), vec3(*rot), vec3(*scale), &local, faces);
            }
        }
    }

    info!(
        "level '{}': {} colliders -> {} triangles",
        level.name,
        level.colliders.len(),
        world.triangle_count()
    );
    Ok(world)
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM_LEVEL: &str = r#"{
        "name": "test platform",
        "spawn": [0.0, 5.0, 0.0],
        "colliders": [
            { "type": "box", "pos": [0.0, 0.0, 0.0], "size": [4.0, 1.0, 4.0] },
            {
                "type": "mesh",
                "pos": [10.0, 0.0, 0.0],
                "vertices": [[-1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 0.0, 1.0]],
                "faces": [[0, 2, 1]]
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_build() {
        let level = parse_level(PLATFORM_LEVEL).unwrap();
        assert_eq!(level.name, "test platform");
        assert_eq!(level.spawn[1], 5.0);
        assert_eq!(level.colliders.len(), 2);

        let world = build_collision_world(&level, &CollisionConfig::default()).unwrap();
        // 12 box triangles + 1 mesh triangle.
        assert_eq!(world.triangle_count(), 13);
    }

    #[test]
    fn test_defaults_for_rot_and_scale() {
        let level = parse_level(PLATFORM_LEVEL).unwrap();
        match &level.colliders[0] {
            ColliderData::Box { rot, scale, .. } => {
                assert_eq!(*rot, [0.0, 0.0, 0.0]);
                assert_eq!(*scale, [1.0, 1.0, 1.0]);
            }
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(parse_level("{ not json"), Err(LevelError::Json(_))));
    }

    #[test]
    fn test_unknown_collider_type_is_an_error() {
        let json = r#"{
            "name": "bad",
            "spawn": [0, 0, 0],
            "colliders": [ { "type": "capsule", "pos": [0, 0, 0] } ]
        }"#;
        assert!(matches!(parse_level(json), Err(LevelError::Json(_))));
    }

    #[test]
    fn test_zero_size_box_rejected() {
        let json = r#"{
            "name": "bad",
            "spawn": [0, 0, 0],
            "colliders": [ { "type": "box", "pos": [0, 0, 0], "size": [1.0, 0.0, 1.0] } ]
        }"#;
        let level = parse_level(json).unwrap();
        let result = build_collision_world(&level, &CollisionConfig::default());
        assert!(matches!(result, Err(LevelError::InvalidBoxSize { index: 0, .. })));
    }

    #[test]
    fn test_mesh_face_out_of_range_rejected() {
        let json = r#"{
            "name": "bad",
            "spawn": [0, 0, 0],
            "colliders": [
                {
                    "type": "mesh",
                    "pos": [0, 0, 0],
                    "vertices": [[0, 0, 0], [1, 0, 0], [0, 0, 1]],
                    "faces": [[0, 1, 3]]
                }
            ]
        }"#;
        let level = parse_level(json).unwrap();
        let result = build_collision_world(&level, &CollisionConfig::default());
        assert!(matches!(
            result,
            Err(LevelError::FaceIndexOutOfRange { index: 0, face: 0, vertex: 3, count: 3 })
        ));
    }
}
