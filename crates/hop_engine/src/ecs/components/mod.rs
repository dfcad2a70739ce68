//! Engine-owned ECS components

pub mod movement;
pub mod transform;

pub use movement::MovementComponent;
pub use transform::TransformComponent;
