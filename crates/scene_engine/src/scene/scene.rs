//! Scene: the entity container edited by the viewport and persisted to disk

use std::any::TypeId;

use crate::assets::BuiltinMesh;
use crate::config::SceneSettings;
use crate::ecs::components::{
    CameraComponent, IdComponent, LightFactory, MeshRendererComponent, RigidbodyComponent, ScriptComponent,
    TagComponent, TransformComponent, TransformFactory,
};
use crate::ecs::{Component, ComponentStore, Entity, EntityId};
use crate::foundation::math::Vec3;

use super::IdentitySource;

/// Gravity applied by the physics stub, in units per second squared
const GRAVITY: f32 = 9.81;

/// Named collection of entities
pub struct Scene {
    name: String,
    store: ComponentStore,
    identities: IdentitySource,
}

impl Scene {
    /// Create an empty scene with an entropy-seeded identity source
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_identity_source(name, IdentitySource::from_entropy())
    }

    /// Create an empty scene drawing identities from `identities`
    pub fn with_identity_source(name: impl Into<String>, identities: IdentitySource) -> Self {
        let name = name.into();
        log::info!("Creating scene: {}", name);
        Self {
            name,
            store: ComponentStore::new(),
            identities,
        }
    }

    /// Create an empty scene from configured defaults
    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self::with_identity_source(
            settings.default_name.clone(),
            IdentitySource::from_seed_option(settings.identity_seed),
        )
    }

    /// Scene display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Component store, for queries
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// Mutable component store, bypassing the per-entity guarantees
    pub(crate) fn store_mut(&mut self) -> &mut ComponentStore {
        &mut self.store
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    /// Create an entity with a fresh identity, the given tag and a default transform
    pub fn create_entity(&mut self, name: &str) -> Entity {
        let id = self.identities.next_id();
        self.create_entity_with_id(id, name)
    }

    /// Create an entity with a known identity, the given tag and a default transform
    pub fn create_entity_with_id(&mut self, id: EntityId, name: &str) -> Entity {
        let entity = self.store.create();
        self.store.add_component(entity, IdComponent::new(id));
        self.store.add_component(entity, TagComponent::new(name));
        self.store.add_component(entity, TransformComponent::default());
        log::debug!("Created entity '{}' ({})", name, id);
        entity
    }

    /// Destroy an entity and all of its components; `false` for dead handles
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let destroyed = self.store.destroy(entity);
        if destroyed {
            log::debug!("Destroyed entity {:?}", entity);
        }
        destroyed
    }

    /// Whether the handle refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.store.is_alive(entity)
    }

    /// Read handle for a live entity
    pub fn entity(&self, entity: Entity) -> Option<EntityRef<'_>> {
        self.is_alive(entity).then_some(EntityRef { entity, scene: self })
    }

    /// Write handle for a live entity
    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        if self.is_alive(entity) {
            Some(EntityMut { entity, scene: self })
        } else {
            None
        }
    }

    /// First entity whose tag equals `tag`
    pub fn find_entity_by_tag(&self, tag: &str) -> Option<Entity> {
        self.store
            .iter_components::<TagComponent>()
            .find(|(_, component)| component.tag == tag)
            .map(|(entity, _)| entity)
    }

    /// Every entity whose tag contains `fragment`
    pub fn find_entities_by_tag(&self, fragment: &str) -> Vec<Entity> {
        self.store
            .iter_components::<TagComponent>()
            .filter(|(_, component)| component.tag.contains(fragment))
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Find a live entity by persistent identity
    pub fn find_entity_by_id(&self, id: EntityId) -> Option<Entity> {
        self.store
            .iter_components::<IdComponent>()
            .find(|(_, component)| component.id() == id)
            .map(|(entity, _)| entity)
    }

    /// Advance scene simulation by `delta_time` seconds
    ///
    /// Runs the script pass, then Euler-integrates rigidbodies into their transforms.
    pub fn on_update(&mut self, delta_time: f32) {
        for (entity, script) in self.store.iter_components::<ScriptComponent>() {
            log::trace!("Script '{}' on {:?} has no runtime", script.script_name, entity);
        }

        let bodies: Vec<Entity> = self
            .store
            .view::<(RigidbodyComponent, TransformComponent)>()
            .iter()
            .collect();

        for entity in bodies {
            let Some(body) = self.store.get_component_mut::<RigidbodyComponent>(entity) else {
                continue;
            };
            if !body.is_kinematic && body.use_gravity {
                body.velocity.y -= GRAVITY * delta_time;
            }
            let velocity = body.velocity;

            if let Some(transform) = self.store.get_component_mut::<TransformComponent>(entity) {
                transform.translation += velocity * delta_time;
            }
        }
    }
}

/// Borrowed read view of a live entity
#[derive(Clone, Copy)]
pub struct EntityRef<'s> {
    entity: Entity,
    scene: &'s Scene,
}

impl<'s> EntityRef<'s> {
    /// Dense-storage handle
    pub fn handle(&self) -> Entity {
        self.entity
    }

    /// Persistent identity
    pub fn id(&self) -> EntityId {
        self.component::<IdComponent>().id()
    }

    /// Display name
    pub fn tag(&self) -> &'s str {
        &self.component::<TagComponent>().tag
    }

    /// Whether the entity has a `T`
    pub fn has_component<T: Component>(&self) -> bool {
        self.scene.store.has_component::<T>(self.entity)
    }

    /// Borrow a component that must be present
    ///
    /// # Panics
    /// Panics when the entity has no `T`.
    pub fn component<T: Component>(&self) -> &'s T {
        match self.try_component::<T>() {
            Some(component) => component,
            None => panic!("entity {:?} has no {}", self.entity, std::any::type_name::<T>()),
        }
    }

    /// Borrow a component if present
    pub fn try_component<T: Component>(&self) -> Option<&'s T> {
        self.scene.store.get_component::<T>(self.entity)
    }
}

/// Borrowed write view of a live entity
pub struct EntityMut<'s> {
    entity: Entity,
    scene: &'s mut Scene,
}

impl<'s> EntityMut<'s> {
    /// Dense-storage handle
    pub fn handle(&self) -> Entity {
        self.entity
    }

    /// Read view of the same entity
    pub fn as_entity_ref(&self) -> EntityRef<'_> {
        EntityRef {
            entity: self.entity,
            scene: &*self.scene,
        }
    }

    /// Persistent identity
    pub fn id(&self) -> EntityId {
        self.as_entity_ref().id()
    }

    /// Display name
    pub fn tag(&self) -> &str {
        &self.component::<TagComponent>().tag
    }

    /// Rename the entity
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.component_mut::<TagComponent>().tag = tag.into();
    }

    /// Whether the entity has a `T`
    pub fn has_component<T: Component>(&self) -> bool {
        self.scene.store.has_component::<T>(self.entity)
    }

    /// Borrow a component that must be present
    ///
    /// # Panics
    /// Panics when the entity has no `T`.
    pub fn component<T: Component>(&self) -> &T {
        match self.try_component::<T>() {
            Some(component) => component,
            None => panic!("entity {:?} has no {}", self.entity, std::any::type_name::<T>()),
        }
    }

    /// Borrow a component if present
    pub fn try_component<T: Component>(&self) -> Option<&T> {
        self.scene.store.get_component::<T>(self.entity)
    }

    /// Mutably borrow a component that must be present
    ///
    /// # Panics
    /// Panics when the entity has no `T`, or when `T` is [`IdComponent`].
    pub fn component_mut<T: Component>(&mut self) -> &mut T {
        let entity = self.entity;
        assert!(!is_identity::<T>(), "identity of entity {:?} is immutable", entity);
        match self.scene.store.get_component_mut::<T>(entity) {
            Some(component) => component,
            None => panic!("entity {:?} has no {}", entity, std::any::type_name::<T>()),
        }
    }

    /// Mutably borrow a component if present; always `None` for [`IdComponent`]
    pub fn try_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        if is_identity::<T>() {
            log::error!("Identity of entity {:?} is immutable", self.entity);
            return None;
        }
        self.scene.store.get_component_mut::<T>(self.entity)
    }

    /// Attach a component; see [`ComponentStore::add_component`]
    pub fn add_component<T: Component>(&mut self, value: T) -> &mut T {
        self.scene.store.add_component(self.entity, value)
    }

    /// Detach and return a component
    ///
    /// Identity, tag and transform stay for the entity's lifetime. Removing
    /// one panics in debug builds; release builds log and return `None`.
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        if is_core::<T>() {
            if cfg!(debug_assertions) {
                panic!("cannot remove {} from scene entity {:?}", std::any::type_name::<T>(), self.entity);
            }
            log::error!(
                "Refusing to remove {} from scene entity {:?}",
                std::any::type_name::<T>(),
                self.entity
            );
            return None;
        }
        self.scene.store.remove_component::<T>(self.entity)
    }
}

fn is_identity<T: Component>() -> bool {
    TypeId::of::<T>() == TypeId::of::<IdComponent>()
}

/// Components every live scene entity carries
fn is_core<T: Component>() -> bool {
    let ty = TypeId::of::<T>();
    ty == TypeId::of::<IdComponent>() || ty == TypeId::of::<TagComponent>() || ty == TypeId::of::<TransformComponent>()
}

/// Fill a scene with the editor's starter content
///
/// A primary camera, a tilted directional light and a unit cube. Returns the cube.
pub fn populate_default_scene(scene: &mut Scene) -> Entity {
    let camera = scene.create_entity("Main Camera");
    if let Some(mut camera) = scene.entity_mut(camera) {
        *camera.component_mut::<TransformComponent>() = TransformFactory::camera(Vec3::new(0.0, 2.0, 10.0));
        camera.add_component(CameraComponent::default());
    }

    let light = scene.create_entity("Directional Light");
    if let Some(mut light) = scene.entity_mut(light) {
        *light.component_mut::<TransformComponent>() = TransformFactory::directional_light(-45.0, -30.0);
        light.add_component(LightFactory::directional(Vec3::new(1.0, 1.0, 1.0), 1.0));
    }

    let cube = scene.create_entity("Cube");
    if let Some(mut cube) = scene.entity_mut(cube) {
        cube.add_component(MeshRendererComponent::new(BuiltinMesh::Cube.path()));
    }

    log::info!("Populated default scene '{}' with {} entities", scene.name(), scene.entity_count());
    cube
}
