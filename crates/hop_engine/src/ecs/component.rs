//! Component trait and dense per-kind storage
//!
//! Components live in one dense secondary map per kind, addressed by entity
//! id. A query over several kinds is a set intersection across those maps,
//! with the shapes checked at compile time.

use slotmap::SecondaryMap;

use super::entity::Entity;

/// Marker trait for components
pub trait Component: 'static + Send + Sync {}

impl Component for crate::collision::DynamicBody {}

/// Dense storage for one component kind
#[derive(Debug, Clone)]
pub struct ComponentStorage<T: Component> {
    data: SecondaryMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            data: SecondaryMap::new(),
        }
    }

    /// Attach a component to an entity, returning the previous value if one
    /// was already attached
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.data.insert(entity, component)
    }

    /// Detach and return an entity's component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.remove(entity)
    }

    /// Borrow an entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity)
    }

    /// Mutably borrow an entity's component
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity)
    }

    /// Check whether an entity carries this component
    pub fn contains(&self, entity: Entity) -> bool {
        self.data.contains_key(entity)
    }

    /// Iterate over all components with their entities
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.data.iter()
    }

    /// Mutably iterate over all components with their entities
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.data.iter_mut()
    }

    /// Number of entities carrying this component
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no entity carries this component
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
