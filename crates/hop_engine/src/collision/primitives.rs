//! Primitive collision geometry and intersection algorithms
//!
//! Provides the axis-aligned bounding box, the preprocessed world-space
//! triangle, and the sphere-vs-triangle narrowphase test that the resolution
//! solver is built on.

use crate::foundation::math::Vec3;

/// Distance below which a sphere center is considered to lie exactly on the
/// triangle surface, where the contact normal degenerates.
const ON_SURFACE_EPSILON: f32 = 1e-5;

/// Squared area below which a triangle is treated as degenerate.
const DEGENERATE_AREA_SQ: f32 = 1e-12;

/// An axis-aligned bounding box for broadphase tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner in world space
    pub min: Vec3,
    /// Maximum corner in world space
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates the smallest AABB containing all given points
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = Vec3::from_element(f32::MAX);
        let mut max = Vec3::from_element(f32::MIN);
        for p in points {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Self { min, max }
    }

    /// Check if this AABB overlaps another
    ///
    /// Boxes that merely touch count as overlapping, which errs toward
    /// passing a candidate to the narrowphase rather than dropping it.
    pub fn intersects(&self, other: &Aabb) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] || self.min[i] > other.max[i] {
                return false;
            }
        }
        true
    }
}

/// A preprocessed world-space collision triangle
///
/// Built once at level-load time and never mutated afterwards. The normal is
/// unit length, and near-horizontal triangles are guaranteed to point upward
/// (see the walkability flip in the world builder).
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex in world space
    pub a: Vec3,
    /// Second vertex
    pub b: Vec3,
    /// Third vertex
    pub c: Vec3,
    /// Unit surface normal (right-hand rule over a, b, c)
    pub normal: Vec3,
    /// Bounding box for broadphase filtering
    pub aabb: Aabb,
}

impl Triangle {
    /// Build a triangle from world-space vertices, computing its normal and
    /// bounding box.
    ///
    /// Returns `None` for degenerate (near-zero-area) input so a bad source
    /// mesh can never inject a NaN normal into the collision world.
    pub fn from_vertices(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let cross = (b - a).cross(&(c - a));
        if cross.magnitude_squared() < DEGENERATE_AREA_SQ {
            return None;
        }
        Some(Self {
            a,
            b,
            c,
            normal: cross.normalize(),
            aabb: Aabb::from_points(&[a, b, c]),
        })
    }
}

/// Result of a sphere-vs-triangle test
///
/// Transient within one solver iteration; never stored.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit vector from the surface toward the sphere center
    pub normal: Vec3,
    /// Penetration depth (positive means penetrating)
    pub depth: f32,
    /// Closest point on the triangle to the sphere center
    pub point: Vec3,
}

/// Closest point on a triangle to a point, via barycentric region tests
/// (Ericson, Real-Time Collision Detection 5.1.5).
///
/// Checks the three vertex regions, the three edge regions, and finally the
/// face region. The face-region denominator is guarded so degenerate
/// triangles cannot divide by zero.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    // Vertex region outside a
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    // Vertex region outside b
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // Edge region ab
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    // Vertex region outside c
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // Edge region ac
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    // Edge region bc
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    // Face region; the sum can vanish for a sliver triangle
    let sum = va + vb + vc;
    if sum.abs() < f32::EPSILON {
        return a;
    }
    let denom = 1.0 / sum;
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Test a sphere against a preprocessed triangle.
///
/// Returns `None` when the closest point is at or beyond the sphere radius.
/// When the center lies exactly on the triangle surface the direction from
/// surface to center is undefined, so the triangle's precomputed normal is
/// used with a full-radius depth.
pub fn sphere_vs_triangle(center: Vec3, radius: f32, triangle: &Triangle) -> Option<Contact> {
    let point = closest_point_on_triangle(center, triangle.a, triangle.b, triangle.c);
    let delta = center - point;
    let dist_sq = delta.magnitude_squared();
    if dist_sq >= radius * radius {
        return None;
    }

    let distance = dist_sq.sqrt();
    if distance < ON_SURFACE_EPSILON {
        return Some(Contact {
            normal: triangle.normal,
            depth: radius,
            point,
        });
    }

    Some(Contact {
        normal: delta / distance,
        depth: radius - distance,
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_floor() -> Triangle {
        Triangle::from_vertices(
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(0.0, 0.0, 10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_normal_is_unit() {
        let tri = unit_floor();
        assert_relative_eq!(tri.normal.magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(tri.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(Triangle::from_vertices(a, a, Vec3::new(4.0, 5.0, 6.0)).is_none());
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(2.0, 2.0, 2.0));
        let c = Aabb::new(Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_closest_point_face_region() {
        let tri = unit_floor();
        let closest = closest_point_on_triangle(Vec3::new(0.0, 3.0, 0.0), tri.a, tri.b, tri.c);
        assert_relative_eq!(closest, Vec3::new(0.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_closest_point_vertex_region() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 1.0);
        let closest = closest_point_on_triangle(Vec3::new(-2.0, 0.5, -2.0), a, b, c);
        assert_relative_eq!(closest, a, epsilon = EPSILON);
    }

    #[test]
    fn test_closest_point_edge_region() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 0.0, 2.0);
        // Directly "below" the midpoint of edge ab, outside the triangle.
        let closest = closest_point_on_triangle(Vec3::new(1.0, 1.0, -3.0), a, b, c);
        assert_relative_eq!(closest, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_closest_point_degenerate_does_not_nan() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let closest = closest_point_on_triangle(Vec3::new(5.0, 5.0, 5.0), a, a, a);
        assert!(closest.x.is_finite() && closest.y.is_finite() && closest.z.is_finite());
    }

    #[test]
    fn test_sphere_miss() {
        let tri = unit_floor();
        assert!(sphere_vs_triangle(Vec3::new(0.0, 2.0, 0.0), 0.5, &tri).is_none());
    }

    #[test]
    fn test_sphere_hit_reports_depth_and_normal() {
        let tri = unit_floor();
        let contact = sphere_vs_triangle(Vec3::new(0.0, 0.3, 0.0), 0.5, &tri).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(contact.depth, 0.2, epsilon = EPSILON);
        assert_relative_eq!(contact.point, Vec3::new(0.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_sphere_center_on_surface_falls_back_to_triangle_normal() {
        let tri = unit_floor();
        let contact = sphere_vs_triangle(Vec3::new(0.0, 0.0, 0.0), 0.5, &tri).unwrap();
        assert_relative_eq!(contact.normal, tri.normal, epsilon = EPSILON);
        assert_relative_eq!(contact.depth, 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_exact_radius_distance_is_not_contact() {
        let tri = unit_floor();
        assert!(sphere_vs_triangle(Vec3::new(0.0, 0.5, 0.0), 0.5, &tri).is_none());
    }
}
