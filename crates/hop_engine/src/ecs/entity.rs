//! Entity allocation
//!
//! Entities are generational slotmap keys, so a despawned entity's id can be
//! reused without stale handles resolving to the new occupant.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Entity identifier
    pub struct Entity;
}

/// Allocator for live entities
#[derive(Debug, Default)]
pub struct Entities {
    live: SlotMap<Entity, ()>,
}

impl Entities {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity
    pub fn spawn(&mut self) -> Entity {
        self.live.insert(())
    }

    /// Remove an entity; returns whether it was live
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.live.remove(entity).is_some()
    }

    /// Check whether an entity is live
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains_key(entity)
    }

    /// Iterate over all live entities
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.keys()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no entities are live
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_despawn() {
        let mut entities = Entities::new();
        let a = entities.spawn();
        let b = entities.spawn();
        assert_ne!(a, b);
        assert_eq!(entities.len(), 2);

        assert!(entities.despawn(a));
        assert!(!entities.despawn(a));
        assert!(!entities.contains(a));
        assert!(entities.contains(b));
    }

    #[test]
    fn test_reused_slot_gets_fresh_generation() {
        let mut entities = Entities::new();
        let a = entities.spawn();
        entities.despawn(a);
        let b = entities.spawn();
        // The slot may be recycled, but the stale handle must not alias it.
        assert!(!entities.contains(a));
        assert!(entities.contains(b));
    }
}
