//! Entity-keyed component storage
//!
//! Components live in a slot map so their storage stays dense as entities
//! come and go, while a side table maps each owning entity to its slot.

use std::collections::HashMap;

use slotmap::{DefaultKey, SlotMap};

use super::{Component, Entity};

/// Pool holding at most one component of type `T` per entity
#[derive(Debug)]
pub struct ComponentPool<T: Component> {
    components: SlotMap<DefaultKey, T>,
    entity_map: HashMap<Entity, DefaultKey>,
}

impl<T: Component> ComponentPool<T> {
    /// Create an empty pool with room for `capacity` components
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: SlotMap::with_capacity(capacity),
            entity_map: HashMap::with_capacity(capacity),
        }
    }

    /// Store `component` under its owning entity.
    ///
    /// Returns `None` and leaves the pool untouched if that entity already
    /// has a component here.
    pub fn emplace(&mut self, component: T) -> Option<&mut T> {
        let entity = component.entity();
        if self.entity_map.contains_key(&entity) {
            return None;
        }
        let key = self.components.insert(component);
        self.entity_map.insert(entity, key);
        self.components.get_mut(key)
    }

    /// Component owned by `entity`, if any
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.entity_map
            .get(&entity)
            .and_then(|key| self.components.get(*key))
    }

    /// Mutable component owned by `entity`, if any
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let key = *self.entity_map.get(&entity)?;
        self.components.get_mut(key)
    }

    /// Remove and return the component owned by `entity`
    pub fn destroy(&mut self, entity: Entity) -> Option<T> {
        let key = self.entity_map.remove(&entity)?;
        self.components.remove(key)
    }

    /// Whether `entity` owns a component in this pool
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_map.contains_key(&entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over all stored components in storage order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.components.values()
    }
}
