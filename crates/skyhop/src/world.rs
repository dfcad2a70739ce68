//! Fixed-schema game world
//!
//! One named storage per component kind, addressed by entity id. Shapes are
//! checked at compile time, and disjoint storages borrow independently, so
//! the tick can walk several component kinds at once without runtime
//! casting.

use hop_engine::ecs::{ComponentStorage, Entities, Entity};
use hop_engine::level::NpcSpawn;
use hop_engine::prelude::{DynamicBody, MovementComponent, TransformComponent, Vec3};

use crate::components::{NpcComponent, PlayerComponent};

/// All entities and their components
#[derive(Default)]
pub struct GameWorld {
    /// Entity allocator
    pub entities: Entities,
    /// Spatial transforms
    pub transforms: ComponentStorage<TransformComponent>,
    /// Velocities
    pub movements: ComponentStorage<MovementComponent>,
    /// Collision bodies
    pub bodies: ComponentStorage<DynamicBody>,
    /// Player markers
    pub players: ComponentStorage<PlayerComponent>,
    /// NPC markers
    pub npcs: ComponentStorage<NpcComponent>,
}

impl GameWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the player with a full dynamic-body component set.
    pub fn spawn_player(&mut self, position: Vec3, radius: f32) -> Entity {
        let entity = self.entities.spawn();
        self.transforms
            .insert(entity, TransformComponent::from_position(position));
        self.movements.insert(entity, MovementComponent::new());
        self.bodies.insert(entity, DynamicBody::new(radius));
        self.players.insert(entity, PlayerComponent { spawn_point: position });
        entity
    }

    /// Spawn an NPC; structurally identical to the player apart from the
    /// marker component.
    pub fn spawn_npc(&mut self, spawn: &NpcSpawn) -> Entity {
        let position = Vec3::new(spawn.pos[0], spawn.pos[1], spawn.pos[2]);
        let entity = self.entities.spawn();
        self.transforms
            .insert(entity, TransformComponent::from_position(position));
        self.movements.insert(entity, MovementComponent::new());
        self.bodies.insert(entity, DynamicBody::new(spawn.radius));
        self.npcs.insert(
            entity,
            NpcComponent {
                name: spawn.name.clone(),
                spawn_point: position,
            },
        );
        entity
    }

    /// Remove an entity and everything attached to it.
    pub fn despawn(&mut self, entity: Entity) {
        self.transforms.remove(entity);
        self.movements.remove(entity);
        self.bodies.remove(entity);
        self.players.remove(entity);
        self.npcs.remove(entity);
        self.entities.despawn(entity);
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities carrying the full dynamic set (transform + movement + body):
    /// the set intersection the simulation tick walks.
    pub fn dynamic_entities(&self) -> Vec<Entity> {
        self.bodies
            .iter()
            .map(|(entity, _)| entity)
            .filter(|&e| self.transforms.contains(e) && self.movements.contains(e))
            .collect()
    }
}
