//! Component store: entity lifetimes plus one dense storage per component type

use std::any::TypeId;
use std::collections::HashMap;

use slotmap::SlotMap;

use super::query::{ComponentSet, View};
use super::storage::{ComponentStorage, ErasedStorage};
use super::{Component, Entity};

/// Entity and component container
///
/// Entities are created with no components. Any number of component types
/// can be attached, at most one instance of each per entity.
#[derive(Default)]
pub struct ComponentStore {
    entities: SlotMap<Entity, ()>,
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
}

impl ComponentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity with no components
    pub fn create(&mut self) -> Entity {
        let entity = self.entities.insert(());
        log::trace!("Created entity {:?}", entity);
        entity
    }

    /// Destroy an entity and all of its components
    ///
    /// Returns `false` when the handle is already dead.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        let mut removed = 0;
        for storage in self.storages.values_mut() {
            if storage.remove_entity(entity) {
                removed += 1;
            }
        }
        log::trace!("Destroyed entity {:?} ({} components)", entity, removed);
        true
    }

    /// Whether the handle refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store has no live entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities in store order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Attach a component to an entity
    ///
    /// # Panics
    /// Panics if the entity is dead. Attaching a second `T` panics in debug
    /// builds; release builds log the error and return the existing component
    /// unchanged.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        assert!(self.is_alive(entity), "add_component on dead entity {:?}", entity);

        let storage = self.storage_or_insert::<T>();
        match storage.slot_of(entity) {
            Some(slot) => {
                if cfg!(debug_assertions) {
                    panic!("entity {:?} already has a {}", entity, std::any::type_name::<T>());
                }
                log::error!(
                    "Ignoring duplicate {} on entity {:?}",
                    std::any::type_name::<T>(),
                    entity
                );
                storage.at_mut(slot)
            }
            None => storage.push(entity, value),
        }
    }

    /// Borrow an entity's component
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    /// Mutably borrow an entity's component
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity has a `T`; false for dead handles
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(false, |storage| storage.contains(entity))
    }

    /// Detach and return an entity's component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(entity)
    }

    /// Lazy, restartable view over entities holding every type in `S`
    pub fn view<S: ComponentSet>(&self) -> View<'_, S> {
        View::new(self)
    }

    /// Entities owning a `T`, in storage order
    pub fn entities_with<T: Component>(&self) -> &[Entity] {
        self.storage::<T>().map_or(&[][..], |storage| storage.entities())
    }

    /// Iterate every `T` with its owner
    pub fn iter_components<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.storage::<T>().into_iter().flat_map(|storage| storage.iter())
    }

    /// Iterate every `T` mutably with its owner
    pub fn iter_components_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.storage_mut::<T>().into_iter().flat_map(|storage| storage.iter_mut())
    }

    /// Number of stored `T` components
    pub fn component_count<T: Component>(&self) -> usize {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(0, |storage| storage.len())
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut())
    }

    fn storage_or_insert<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        match storage.as_any_mut().downcast_mut() {
            Some(storage) => storage,
            None => unreachable!("storage registered under a foreign TypeId"),
        }
    }
}
