use approx::assert_relative_eq;

use crate::assets::BuiltinMesh;
use crate::ecs::components::{
    CameraComponent, IdComponent, LightComponent, LightType, MeshRendererComponent, RigidbodyComponent, TagComponent,
    TransformComponent,
};
use crate::foundation::math::Vec3;
use crate::scene::{populate_default_scene, IdentityPolicy, IdentitySource, Scene, SceneSerializer};

fn scene(seed: u64) -> Scene {
    Scene::with_identity_source("Round Trip", IdentitySource::seeded(seed))
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("scene_engine_{}_{}", std::process::id(), name))
}

#[test]
fn test_cube_round_trip() {
    let mut source = scene(1);
    source.create_entity("Cube");

    let text = SceneSerializer::default().serialize_to_string(&source).unwrap();
    let mut loaded = scene(2);
    SceneSerializer::default().deserialize_from_str(&mut loaded, &text).unwrap();

    assert_eq!(loaded.entity_count(), 1);
    let cube = loaded.find_entity_by_tag("Cube").unwrap();
    let transform = loaded.entity(cube).unwrap().component::<TransformComponent>().clone();
    assert_eq!(transform.translation, Vec3::zeros());
    assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
}

#[test]
fn test_round_trip_reproduces_fields_and_membership() {
    let mut source = scene(3);
    populate_default_scene(&mut source);

    let lamp = source.create_entity("Lamp");
    {
        let mut lamp = source.entity_mut(lamp).unwrap();
        let transform = lamp.component_mut::<TransformComponent>();
        transform.translation = Vec3::new(-3.25, 4.5, 0.125);
        transform.rotation = Vec3::new(0.1, -0.2, 0.3);
        transform.scale = Vec3::new(2.0, 0.5, 1.5);
        lamp.add_component(LightComponent {
            light_type: LightType::Spot,
            color: Vec3::new(0.9, 0.8, 0.7),
            intensity: 2.5,
            range: 17.0,
            ..Default::default()
        });
        // Not part of the document format
        lamp.add_component(RigidbodyComponent::default());
    }

    let path = temp_path("round_trip.ron");
    SceneSerializer::default().serialize_to_file(&source, &path).unwrap();
    let mut loaded = scene(4);
    let created = SceneSerializer::default().deserialize_from_file(&mut loaded, &path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(created.len(), source.entity_count());
    assert_eq!(loaded.name(), "Round Trip");

    for original in source.store().entities() {
        let original = source.entity(original).unwrap();
        let copy = loaded.find_entity_by_tag(original.tag()).unwrap();
        let copy = loaded.entity(copy).unwrap();

        assert_eq!(copy.component::<TransformComponent>(), original.component::<TransformComponent>());
        assert_eq!(copy.has_component::<CameraComponent>(), original.has_component::<CameraComponent>());
        assert_eq!(copy.has_component::<LightComponent>(), original.has_component::<LightComponent>());
        assert_eq!(
            copy.has_component::<MeshRendererComponent>(),
            original.has_component::<MeshRendererComponent>()
        );
        assert!(!copy.has_component::<RigidbodyComponent>());
    }

    let lamp = loaded.entity(loaded.find_entity_by_tag("Lamp").unwrap()).unwrap();
    let light = lamp.component::<LightComponent>();
    assert_eq!(light.light_type, LightType::Spot);
    assert_eq!(light.color, Vec3::new(0.9, 0.8, 0.7));
    assert_eq!(light.intensity, 2.5);
    assert_eq!(light.range, 17.0);

    let camera = loaded.entity(loaded.find_entity_by_tag("Main Camera").unwrap()).unwrap();
    assert_eq!(camera.component::<CameraComponent>(), &CameraComponent::default());

    let cube = loaded.entity(loaded.find_entity_by_tag("Cube").unwrap()).unwrap();
    assert_eq!(cube.component::<MeshRendererComponent>().model_path, BuiltinMesh::Cube.path());

    let light = loaded.entity(loaded.find_entity_by_tag("Directional Light").unwrap()).unwrap();
    assert_relative_eq!(
        light.component::<TransformComponent>().rotation.x,
        -std::f32::consts::FRAC_PI_4,
        epsilon = 1e-6
    );
}

#[test]
fn test_preserve_policy_keeps_identities() {
    let mut source = scene(5);
    populate_default_scene(&mut source);
    let text = SceneSerializer::new(IdentityPolicy::Preserve).serialize_to_string(&source).unwrap();

    let mut loaded = scene(6);
    SceneSerializer::new(IdentityPolicy::Preserve)
        .deserialize_from_str(&mut loaded, &text)
        .unwrap();

    for (entity, id) in source.store().iter_components::<IdComponent>() {
        let tag = &source.store().get_component::<TagComponent>(entity).unwrap().tag;
        let copy = loaded.find_entity_by_id(id.id()).unwrap();
        assert_eq!(&loaded.entity(copy).unwrap().component::<TagComponent>().tag, tag);
    }
}

#[test]
fn test_regenerate_policy_mints_fresh_identities() {
    let mut source = scene(7);
    populate_default_scene(&mut source);
    let text = SceneSerializer::default().serialize_to_string(&source).unwrap();

    let mut loaded = scene(8);
    SceneSerializer::new(IdentityPolicy::Regenerate)
        .deserialize_from_str(&mut loaded, &text)
        .unwrap();

    assert_eq!(loaded.entity_count(), 3);
    for (_, id) in source.store().iter_components::<IdComponent>() {
        assert!(loaded.find_entity_by_id(id.id()).is_none());
    }
}

#[test]
fn test_save_load_save_is_stable() {
    let mut source = scene(9);
    populate_default_scene(&mut source);
    let serializer = SceneSerializer::default();
    let first = serializer.serialize_to_string(&source).unwrap();

    let mut loaded = scene(10);
    serializer.deserialize_from_str(&mut loaded, &first).unwrap();
    let second = serializer.serialize_to_string(&loaded).unwrap();

    // Only the runtime handle field may differ; identities and data match.
    let strip = |text: &str| -> Vec<String> {
        text.lines()
            .filter(|line| !line.trim_start().starts_with("entity:"))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(strip(&first), strip(&second));
}
