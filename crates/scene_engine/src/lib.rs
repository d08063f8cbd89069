//! # Scene Engine
//!
//! Core of an interactive 3D scene editor: an entity/component store, an
//! orbital editor camera, a gizmo-driven transform pipeline and a text scene
//! format.
//!
//! ## Features
//!
//! - **ECS**: generational entity handles with dense per-type component storage
//! - **Editor Camera**: orbit, pan, zoom and fly navigation around a focal point
//! - **Gizmo Pipeline**: decomposes gizmo-edited matrices back into transforms
//! - **Scene Persistence**: RON scene documents with stable entity identities
//!
//! Windowing, GPU work and the gizmo widget itself are supplied by the host
//! through the [`render::Renderer`] and [`editor::GizmoOverlay`] traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SerializerError> {
//!     let config = EditorConfig::default();
//!     let mut scene = Scene::from_settings(&config.scene);
//!     let cube = populate_default_scene(&mut scene);
//!
//!     let mut viewport = ViewportPanel::from_config(&config);
//!     let mut renderer = HeadlessRenderer::new(1280, 720);
//!     let mut gizmo = ScriptedGizmo::new();
//!     let input = ViewportInput::active(ScreenRect::new(0.0, 0.0, 1280.0, 720.0), CameraInput::new());
//!     viewport.on_update(0.016, &input, &mut scene, Some(cube), &mut renderer, &mut gizmo);
//!
//!     SceneSerializer::default().serialize_to_file(&scene, "scene.ron")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;
pub mod editor;
pub mod render;
pub mod assets;

#[cfg(test)]
mod tests;

/// Common imports for editor hosts
pub mod prelude {
    pub use crate::{
        assets::{BuiltinMesh, ModelFormat},
        config::{Config, ConfigError, EditorConfig},
        ecs::{
            components::{
                CameraComponent, ColliderComponent, IdComponent, LightComponent, LightType, MeshRendererComponent,
                RigidbodyComponent, ScriptComponent, TagComponent, TransformComponent,
            },
            Component, ComponentStore, Entity, EntityId,
        },
        editor::{
            CameraInput, EditorCamera, GizmoOperation, GizmoOutcome, GizmoOverlay, KeyCode, MouseButton,
            ScreenRect, ScriptedGizmo, ViewportInput, ViewportPanel,
        },
        foundation::{
            math::{Mat4, Quat, Vec3},
            time::{FrameClock, Stopwatch},
        },
        render::{HeadlessRenderer, RenderStats, Renderer},
        scene::{populate_default_scene, IdentityPolicy, IdentitySource, Scene, SceneSerializer, SerializerError},
    };
}
