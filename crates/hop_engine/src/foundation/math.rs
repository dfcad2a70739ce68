//! Math utilities and types
//!
//! Provides the fundamental math types for the simulation core, plus the
//! Euler-angle transform pipeline shared by the collision builder and any
//! companion renderer.

pub use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Build a rotation matrix from Euler angles in degrees, YXZ intrinsic order
/// (yaw around Y first, then pitch around the rotated X, then roll around the
/// rotated Z).
///
/// This ordering is a protocol contract: the collision builder and anything
/// that must agree with it (renderer, level tools) use this exact
/// composition, `Ry * Rx * Rz`.
pub fn euler_to_matrix(rot_deg: Vec3) -> Mat3 {
    let yaw = Rotation3::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(rot_deg.y));
    let pitch = Rotation3::from_axis_angle(&Vec3::x_axis(), utils::deg_to_rad(rot_deg.x));
    let roll = Rotation3::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(rot_deg.z));
    (yaw * pitch * roll).into_inner()
}

/// Transform a local-space point into world space.
///
/// The order is fixed: scale (component-wise), then rotate via
/// [`euler_to_matrix`], then translate.
pub fn transform_point(local: Vec3, pos: Vec3, rot_deg: Vec3, scale: Vec3) -> Vec3 {
    pos + euler_to_matrix(rot_deg) * local.component_mul(&scale)
}
