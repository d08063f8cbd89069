//! Scene persistence
//!
//! Scenes are stored as RON documents:
//!
//! ```text
//! #![enable(implicit_some)]
//! (
//!     scene: "Untitled Scene",
//!     entities: [
//!         (
//!             entity: 4294967297,
//!             id: 9132475210954466812,
//!             tag: (tag: "Cube"),
//!             transform: (position: (0.0, 0.0, 0.0), rotation: (0.0, 0.0, 0.0), scale: (1.0, 1.0, 1.0)),
//!             mesh_renderer: (model_path: "builtin://cube", cast_shadows: true, receive_shadows: true),
//!         ),
//!     ],
//! )
//! ```
//!
//! `entity` is the runtime handle and is written for compatibility only; `id`
//! is the persistent identity. Component sections are omitted when the
//! component is absent, and left unset on load when the section is absent.

use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::ecs::components::{
    CameraComponent, IdComponent, LightComponent, LightType, MeshRendererComponent, TagComponent,
    TransformComponent,
};
use crate::ecs::{Entity, EntityId};
use crate::foundation::math::Vec3;
use crate::foundation::time::Stopwatch;

use super::Scene;

/// How persisted identities are treated on load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    /// Recreate entities with the identity stored in the document
    #[default]
    Preserve,
    /// Mint fresh identities, ignoring the stored ones
    Regenerate,
}

/// Scene persistence errors
#[derive(thiserror::Error, Debug)]
pub enum SerializerError {
    /// Scene file could not be read or written
    #[error("IO error on '{path}': {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document text is not a valid scene document
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Scene could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Document has no top-level `scene` entry
    #[error("Scene document is missing the 'scene' marker")]
    MissingSceneMarker,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SceneDocument {
    #[serde(default)]
    scene: Option<String>,
    #[serde(default)]
    entities: Vec<EntityRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntityRecord {
    #[serde(default)]
    entity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<TagRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transform: Option<TransformRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    camera: Option<CameraRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mesh_renderer: Option<MeshRendererRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    light: Option<LightRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TagRecord {
    tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransformRecord {
    position: [f32; 3],
    rotation: [f32; 3],
    scale: [f32; 3],
}

#[derive(Debug, Serialize, Deserialize)]
struct CameraRecord {
    fov: f32,
    aspect_ratio: f32,
    near_clip: f32,
    far_clip: f32,
    primary: bool,
    fixed_aspect_ratio: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct MeshRendererRecord {
    model_path: String,
    cast_shadows: bool,
    receive_shadows: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct LightRecord {
    #[serde(rename = "type")]
    light_type: i32,
    color: [f32; 3],
    intensity: f32,
    range: f32,
}

fn to_array(v: &Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

fn from_array(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

/// Reads and writes scene documents
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneSerializer {
    policy: IdentityPolicy,
}

impl SceneSerializer {
    /// Serializer with the given identity policy
    pub fn new(policy: IdentityPolicy) -> Self {
        Self { policy }
    }

    /// Identity policy applied on load
    pub fn policy(&self) -> IdentityPolicy {
        self.policy
    }

    /// Encode every tagged entity of `scene` as a document
    pub fn serialize_to_string(&self, scene: &Scene) -> Result<String, SerializerError> {
        let store = scene.store();
        let entities: Vec<EntityRecord> = store
            .entities()
            .filter(|&entity| store.has_component::<TagComponent>(entity))
            .map(|entity| Self::record_for(scene, entity))
            .collect();

        let document = SceneDocument {
            scene: Some(scene.name().to_string()),
            entities,
        };
        let config = PrettyConfig::new().extensions(Extensions::IMPLICIT_SOME);
        Ok(ron::ser::to_string_pretty(&document, config)?)
    }

    /// Write `scene` to `path`
    pub fn serialize_to_file(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<(), SerializerError> {
        let path = path.as_ref();
        let stopwatch = Stopwatch::start_new();

        let result = self.serialize_to_string(scene).and_then(|text| {
            std::fs::write(path, text).map_err(|source| SerializerError::Io {
                path: path.to_path_buf(),
                source,
            })
        });

        match &result {
            Ok(()) => log::info!(
                "Scene '{}' saved to {} ({:.2} ms)",
                scene.name(),
                path.display(),
                stopwatch.elapsed_millis()
            ),
            Err(e) => log::error!("Failed to save scene to {}: {}", path.display(), e),
        }
        result
    }

    /// Populate `scene` from document text
    ///
    /// The whole document is parsed before any entity is created, so a
    /// malformed document leaves the scene untouched. Returns the created
    /// entities in document order. The scene takes the document's name.
    pub fn deserialize_from_str(&self, scene: &mut Scene, text: &str) -> Result<Vec<Entity>, SerializerError> {
        let document: SceneDocument = ron::from_str(text)?;
        let name = document.scene.ok_or(SerializerError::MissingSceneMarker)?;

        log::info!("Deserializing scene '{}' ({} entities)", name, document.entities.len());
        scene.set_name(name);

        let created = document
            .entities
            .into_iter()
            .map(|record| self.restore_entity(scene, record))
            .collect();
        Ok(created)
    }

    /// Populate `scene` from the document at `path`
    pub fn deserialize_from_file(&self, scene: &mut Scene, path: impl AsRef<Path>) -> Result<Vec<Entity>, SerializerError> {
        let path = path.as_ref();
        let stopwatch = Stopwatch::start_new();

        let result = std::fs::read_to_string(path)
            .map_err(|source| SerializerError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| self.deserialize_from_str(scene, &text));

        match &result {
            Ok(entities) => log::info!(
                "Scene loaded from {} ({} entities, {:.2} ms)",
                path.display(),
                entities.len(),
                stopwatch.elapsed_millis()
            ),
            Err(e) => log::error!("Failed to load scene file {}: {}", path.display(), e),
        }
        result
    }

    fn record_for(scene: &Scene, entity: Entity) -> EntityRecord {
        let store = scene.store();

        EntityRecord {
            entity: entity.raw(),
            id: store.get_component::<IdComponent>(entity).map(|c| c.id().value()),
            tag: store
                .get_component::<TagComponent>(entity)
                .map(|c| TagRecord { tag: c.tag.clone() }),
            transform: store
                .get_component::<TransformComponent>(entity)
                .map(|c| TransformRecord {
                    position: to_array(&c.translation),
                    rotation: to_array(&c.rotation),
                    scale: to_array(&c.scale),
                }),
            camera: store.get_component::<CameraComponent>(entity).map(|c| CameraRecord {
                fov: c.fov,
                aspect_ratio: c.aspect_ratio,
                near_clip: c.near_clip,
                far_clip: c.far_clip,
                primary: c.primary,
                fixed_aspect_ratio: c.fixed_aspect_ratio,
            }),
            mesh_renderer: store
                .get_component::<MeshRendererComponent>(entity)
                .map(|c| MeshRendererRecord {
                    model_path: c.model_path.clone(),
                    cast_shadows: c.cast_shadows,
                    receive_shadows: c.receive_shadows,
                }),
            light: store.get_component::<LightComponent>(entity).map(|c| LightRecord {
                light_type: c.light_type.code(),
                color: to_array(&c.color),
                intensity: c.intensity,
                range: c.range,
            }),
        }
    }

    fn restore_entity(&self, scene: &mut Scene, record: EntityRecord) -> Entity {
        let name = record.tag.map(|t| t.tag).unwrap_or_default();

        let entity = match (self.policy, record.id) {
            (IdentityPolicy::Preserve, Some(id)) => {
                let id = EntityId(id);
                if scene.find_entity_by_id(id).is_some() {
                    log::warn!("Scene already contains identity {}; loading '{}' anyway", id, name);
                }
                scene.create_entity_with_id(id, &name)
            }
            _ => scene.create_entity(&name),
        };
        log::trace!("Deserialized entity '{}' (document handle {})", name, record.entity);

        let Some(mut handle) = scene.entity_mut(entity) else {
            return entity;
        };

        if let Some(transform) = record.transform {
            *handle.component_mut::<TransformComponent>() = TransformComponent {
                translation: from_array(transform.position),
                rotation: from_array(transform.rotation),
                scale: from_array(transform.scale),
            };
        }

        if let Some(camera) = record.camera {
            handle.add_component(CameraComponent {
                primary: camera.primary,
                fixed_aspect_ratio: camera.fixed_aspect_ratio,
                fov: camera.fov,
                aspect_ratio: camera.aspect_ratio,
                near_clip: camera.near_clip,
                far_clip: camera.far_clip,
            });
        }

        if let Some(mesh) = record.mesh_renderer {
            handle.add_component(MeshRendererComponent {
                model_path: mesh.model_path,
                cast_shadows: mesh.cast_shadows,
                receive_shadows: mesh.receive_shadows,
                ..Default::default()
            });
        }

        if let Some(light) = record.light {
            let light_type = LightType::try_from(light.light_type).unwrap_or_else(|code| {
                log::warn!("Unknown light type {} on '{}', using Point", code, name);
                LightType::Point
            });
            handle.add_component(LightComponent {
                light_type,
                color: from_array(light.color),
                intensity: light.intensity,
                range: light.range,
                ..Default::default()
            });
        }

        entity
    }
}
