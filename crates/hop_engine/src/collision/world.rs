//! Triangle collision world and broadphase query
//!
//! Converts declarative box and mesh colliders into preprocessed world-space
//! triangles, and answers AABB-filtered candidate queries around a moving
//! sphere.
//!
//! The world is a flat triangle array with a per-triangle AABB pre-filter.
//! There is deliberately no spatial hierarchy: levels carry hundreds of
//! triangles, not millions, and a flat scan behind the AABB test is fast
//! enough at that scale. This is a documented scalability limit.

use log::warn;

use super::config::CollisionConfig;
use super::primitives::{Aabb, Triangle};
use crate::foundation::math::{transform_point, Vec3};

/// Fraction of the velocity added to the query box along the direction of
/// travel, a cheap proxy for continuous collision detection.
const VELOCITY_EXPANSION: f32 = 0.1;

/// Generate the vertex triples of an oriented box collider.
///
/// The 8 corners of a box with half-extents `size / 2` are transformed
/// through the shared scale-rotate-translate pipeline, then emitted as 6
/// quads (2 triangles each) in a fixed per-face vertex order. Each quad
/// `(a, b, c, d)` is split into `(a, b, c)` and `(a, c, d)`; the winding is
/// consistent so every face normal points out of the box.
pub fn box_triangles(pos: Vec3, rot_deg: Vec3, scale: Vec3, size: Vec3) -> Vec<[Vec3; 3]> {
    let h = size * 0.5;
    let local = [
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ];
    let corners: Vec<Vec3> = local
        .iter()
        .map(|&p| transform_point(p, pos, rot_deg, scale))
        .collect();

    // Quad vertex indices per face: front, back, left, right, bottom, top.
    const FACES: [[usize; 4]; 6] = [
        [4, 5, 6, 7],
        [1, 0, 3, 2],
        [0, 4, 7, 3],
        [5, 1, 2, 6],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
    ];

    let mut triangles = Vec::with_capacity(12);
    for [a, b, c, d] in FACES {
        triangles.push([corners[a], corners[b], corners[c]]);
        triangles.push([corners[a], corners[c], corners[d]]);
    }
    triangles
}

/// The static triangle soup all dynamic bodies collide against
///
/// Append-only during level load, read-only during simulation.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    triangles: Vec<Triangle>,
    walkable_threshold: f32,
}

impl CollisionWorld {
    /// Create an empty world using the default walkability threshold.
    pub fn new() -> Self {
        Self::with_config(&CollisionConfig::default())
    }

    /// Create an empty world whose walkability flip uses the configured
    /// slope threshold.
    pub fn with_config(config: &CollisionConfig) -> Self {
        Self {
            triangles: Vec::new(),
            walkable_threshold: config.min_ground_normal_y(),
        }
    }

    /// Append the 12 triangles of an oriented box collider.
    ///
    /// Returns the number of triangles actually added.
    pub fn add_box_collider(&mut self, pos: Vec3, rot_deg: Vec3, scale: Vec3, size: Vec3) -> usize {
        let mut added = 0;
        for [a, b, c] in box_triangles(pos, rot_deg, scale, size) {
            added += usize::from(self.push_triangle(a, b, c));
        }
        added
    }

    /// Append a pre-triangulated mesh collider.
    ///
    /// `faces` are index triples into `vertices`; polygonal faces must
    /// already have been triangulated by the loader. Every vertex goes
    /// through the same transform pipeline as box corners.
    pub fn add_mesh_collider(
        &mut self,
        pos: Vec3,
        rot_deg: Vec3,
        scale: Vec3,
        vertices: &[Vec3],
        faces: &[[u32; 3]],
    ) -> usize {
        let world_vertices: Vec<Vec3> = vertices
            .iter()
            .map(|&v| transform_point(v, pos, rot_deg, scale))
            .collect();

        let mut added = 0;
        for face in faces {
            let resolved: Option<Vec<Vec3>> = face
                .iter()
                .map(|&i| world_vertices.get(i as usize).copied())
                .collect();
            match resolved {
                Some(v) => added += usize::from(self.push_triangle(v[0], v[1], v[2])),
                None => warn!("mesh face {face:?} indexes past {} vertices, skipped", vertices.len()),
            }
        }
        added
    }

    /// Preprocess and store one triangle.
    ///
    /// Near-horizontal triangles (|normal.y| at or above the walkability
    /// threshold) always get an upward-pointing normal, regardless of the
    /// source winding. Imported meshes wind ground faces inconsistently, and
    /// a downward normal would classify walkable ground as ceiling. Surfaces
    /// meant to be walked on from below are misclassified by this rule; that
    /// is a known limitation.
    fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) -> bool {
        let Some(mut triangle) = Triangle::from_vertices(a, b, c) else {
            warn!("degenerate triangle skipped: {a:?} {b:?} {c:?}");
            return false;
        };
        if triangle.normal.y.abs() >= self.walkable_threshold && triangle.normal.y < 0.0 {
            triangle.normal = -triangle.normal;
        }
        self.triangles.push(triangle);
        true
    }

    /// Number of triangles in the world.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// All triangles, in insertion order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Broadphase: collect triangles whose AABB overlaps a query box around
    /// the sphere.
    ///
    /// The box spans `radius + query_margin` horizontally and
    /// `down_margin`/`up_margin` vertically; the downward margin is larger so
    /// ground below a falling body is always among the candidates. When a
    /// velocity is supplied the box is stretched along the direction of
    /// travel in proportion to speed.
    pub fn query_near(
        &self,
        position: Vec3,
        radius: f32,
        config: &CollisionConfig,
        velocity: Option<Vec3>,
    ) -> Vec<&Triangle> {
        let horizontal = radius + config.query_margin;
        let mut min = Vec3::new(
            position.x - horizontal,
            position.y - config.down_margin,
            position.z - horizontal,
        );
        let mut max = Vec3::new(
            position.x + horizontal,
            position.y + config.up_margin,
            position.z + horizontal,
        );

        if let Some(vel) = velocity {
            for i in 0..3 {
                let reach = vel[i] * VELOCITY_EXPANSION;
                if reach > 0.0 {
                    max[i] += reach;
                } else {
                    min[i] += reach;
                }
            }
        }

        let query = Aabb::new(min, max);
        self.triangles
            .iter()
            .filter(|t| t.aabb.intersects(&query))
            .collect()
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}
