use crate::ecs::components::{LightComponent, MeshRendererComponent, TagComponent, TransformComponent};
use crate::ecs::{ComponentStore, Entity};

fn populated_store() -> (ComponentStore, Vec<Entity>) {
    let mut store = ComponentStore::new();
    let mut entities = Vec::new();
    for i in 0..6 {
        let entity = store.create();
        store.add_component(entity, TransformComponent::default());
        if i % 2 == 0 {
            store.add_component(entity, MeshRendererComponent::new("builtin://cube"));
        }
        if i % 3 == 0 {
            store.add_component(entity, LightComponent::default());
        }
        entities.push(entity);
    }
    (store, entities)
}

#[test]
fn test_single_type_view() {
    let (store, entities) = populated_store();
    let view = store.view::<(TransformComponent,)>();
    let seen: Vec<_> = view.iter().collect();
    assert_eq!(seen, entities);
}

#[test]
fn test_multi_type_view_filters() {
    let (store, entities) = populated_store();
    let seen: Vec<_> = store
        .view::<(TransformComponent, MeshRendererComponent, LightComponent)>()
        .iter()
        .collect();
    assert_eq!(seen, vec![entities[0]]);

    let renderable = store.view::<(MeshRendererComponent, TransformComponent)>();
    assert_eq!(renderable.count(), 3);
}

#[test]
fn test_view_is_restartable() {
    let (store, _) = populated_store();
    let view = store.view::<(TransformComponent, LightComponent)>();
    let first: Vec<_> = view.iter().collect();
    let second: Vec<_> = view.into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_view_over_unregistered_type_is_empty() {
    let (store, _) = populated_store();
    assert!(store.view::<(TagComponent, TransformComponent)>().is_empty());
    assert!(store.view::<(TransformComponent, TagComponent, LightComponent, MeshRendererComponent)>().is_empty());
}
