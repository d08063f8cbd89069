//! Dense per-type component storage
//!
//! Each component type lives in one [`ComponentStorage<T>`]: a packed `Vec<T>`
//! with a parallel `Vec<Entity>` and an entity-to-slot lookup. Removal is a
//! swap-remove, so slots are not stable across removals.

use std::any::Any;

use slotmap::SecondaryMap;

use super::{Component, Entity};

/// Type-erased operations the store needs without knowing `T`
pub trait ErasedStorage: Any + Send + Sync {
    /// Drop the entity's component if present; returns whether one was removed
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Whether the entity has a component in this storage
    fn contains(&self, entity: Entity) -> bool;

    /// Number of stored components
    fn len(&self) -> usize;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Packed storage for a single component type
pub struct ComponentStorage<T: Component> {
    dense: Vec<T>,
    entities: Vec<Entity>,
    slots: SecondaryMap<Entity, usize>,
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentStorage<T> {
    /// Create empty storage
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            entities: Vec::new(),
            slots: SecondaryMap::new(),
        }
    }

    /// Slot index of the entity's component
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.slots.get(entity).copied()
    }

    /// Append a component for an entity that has none; returns it
    pub fn push(&mut self, entity: Entity, value: T) -> &mut T {
        let slot = self.dense.len();
        self.dense.push(value);
        self.entities.push(entity);
        self.slots.insert(entity, slot);
        &mut self.dense[slot]
    }

    /// Component at a slot returned by [`Self::slot_of`]
    pub fn at_mut(&mut self, slot: usize) -> &mut T {
        &mut self.dense[slot]
    }

    /// Borrow the entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot_of(entity).map(|slot| &self.dense[slot])
    }

    /// Mutably borrow the entity's component
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = self.slot_of(entity)?;
        Some(&mut self.dense[slot])
    }

    /// Remove and return the entity's component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.remove(entity)?;
        let value = self.dense.swap_remove(slot);
        self.entities.swap_remove(slot);
        if let Some(&moved) = self.entities.get(slot) {
            self.slots.insert(moved, slot);
        }
        Some(value)
    }

    /// Entities owning a component, in slot order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate `(entity, component)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }

    /// Iterate `(entity, component)` pairs mutably in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.dense.iter_mut())
    }
}

impl<T: Component> ErasedStorage for ComponentStorage<T> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(entity)
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[test]
    fn test_swap_remove_keeps_lookup_consistent() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());
        let c = keys.insert(());

        let mut storage = ComponentStorage::new();
        storage.push(a, Health(1));
        storage.push(b, Health(2));
        storage.push(c, Health(3));

        assert_eq!(storage.remove(a), Some(Health(1)));
        assert_eq!(storage.get(c), Some(&Health(3)));
        assert_eq!(storage.get(b), Some(&Health(2)));
        assert_eq!(storage.entities().len(), 2);
        assert!(!ErasedStorage::contains(&storage, a));
    }

    #[test]
    fn test_remove_last_slot() {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut storage = ComponentStorage::new();
        storage.push(a, Health(1));
        storage.push(b, Health(2));

        assert!(storage.remove_entity(b));
        assert!(!storage.remove_entity(b));
        assert_eq!(storage.get(a), Some(&Health(1)));
        assert_eq!(ErasedStorage::len(&storage), 1);
    }
}
