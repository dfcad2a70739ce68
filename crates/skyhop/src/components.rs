//! Game-specific components

use hop_engine::ecs::Component;
use hop_engine::prelude::Vec3;

/// Marks the player-controlled entity
#[derive(Debug, Clone)]
pub struct PlayerComponent {
    /// Where the respawn flow places the player
    pub spawn_point: Vec3,
}

impl Component for PlayerComponent {}

/// Marks a non-player character
///
/// NPCs share the player's body pipeline: gravity, integration, and the
/// collision solver treat them identically.
#[derive(Debug, Clone)]
pub struct NpcComponent {
    /// Display name
    pub name: String,
    /// Where the respawn flow places this NPC
    pub spawn_point: Vec3,
}

impl Component for NpcComponent {}
