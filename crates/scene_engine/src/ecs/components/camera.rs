//! Scene camera component

use crate::ecs::Component;
use crate::foundation::math::{perspective, utils::deg_to_rad, Mat4};

/// In-scene camera (distinct from the editor's navigation camera)
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    /// Whether this is the scene's main camera
    pub primary: bool,
    /// Keep `aspect_ratio` when the viewport resizes
    pub fixed_aspect_ratio: bool,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width over height
    pub aspect_ratio: f32,
    /// Near clipping plane
    pub near_clip: f32,
    /// Far clipping plane
    pub far_clip: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            primary: true,
            fixed_aspect_ratio: false,
            fov: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

impl Component for CameraComponent {}

impl CameraComponent {
    /// Right-handed perspective projection
    pub fn projection(&self) -> Mat4 {
        perspective(deg_to_rad(self.fov), self.aspect_ratio, self.near_clip, self.far_clip)
    }
}
