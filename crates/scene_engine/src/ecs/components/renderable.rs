//! Mesh renderer component
//!
//! References a model by path; loading and GPU residency belong to the
//! renderer. Paths under `builtin://` name primitive meshes.

use crate::ecs::Component;
use crate::foundation::math::{Vec3, Vec4};

/// Component for entities drawn as a model
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRendererComponent {
    /// Model file or builtin primitive path
    pub model_path: String,

    /// Whether the mesh casts shadows
    pub cast_shadows: bool,

    /// Whether the mesh receives shadows
    pub receive_shadows: bool,

    /// Whether this object is drawn at all
    pub visible: bool,

    /// Whether the renderer may cull against `bounds_min`/`bounds_max`
    pub frustum_culling: bool,

    /// Level of detail, 0 is the highest quality
    pub lod_level: u32,

    /// Local-space bounding box minimum
    pub bounds_min: Vec3,

    /// Local-space bounding box maximum
    pub bounds_max: Vec3,

    /// Draw a selection outline
    pub show_outline: bool,

    /// Outline RGBA color
    pub outline_color: Vec4,

    /// Outline width in pixels
    pub outline_width: f32,
}

impl Default for MeshRendererComponent {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            cast_shadows: true,
            receive_shadows: true,
            visible: true,
            frustum_culling: true,
            lod_level: 0,
            bounds_min: Vec3::new(-0.5, -0.5, -0.5),
            bounds_max: Vec3::new(0.5, 0.5, 0.5),
            show_outline: false,
            outline_color: Vec4::new(1.0, 0.5, 0.0, 1.0),
            outline_width: 2.0,
        }
    }
}

impl Component for MeshRendererComponent {}

impl MeshRendererComponent {
    /// Create a renderer for the model at `model_path`
    pub fn new(model_path: impl Into<String>) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible && !self.model_path.is_empty()
    }
}
