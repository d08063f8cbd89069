//! # Editor Configuration
//!
//! Settings for the editor session: logging, scene defaults, editor camera
//! navigation and gizmo snapping. Every struct has defaults matching the
//! editor's built-in behaviour, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Scene creation settings
    pub scene: SceneSettings,
    /// Editor camera navigation settings
    pub camera: CameraConfig,
    /// Gizmo snapping settings
    pub gizmo: GizmoConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            scene: SceneSettings::default(),
            camera: CameraConfig::default(),
            gizmo: GizmoConfig::default(),
        }
    }
}

impl Config for EditorConfig {}

impl EditorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.gizmo.validate()?;
        if self.scene.default_name.trim().is_empty() {
            return Err(ConfigError::Invalid("Scene name cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Scene creation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Name given to new scenes
    pub default_name: String,
    /// Seed for entity identity generation; `None` seeds from OS entropy
    pub identity_seed: Option<u64>,
    /// Default scene document path used by save/open
    pub scene_path: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            default_name: "Untitled Scene".to_string(),
            identity_seed: None,
            scene_path: "assets/scenes/Untitled Scene.ron".to_string(),
        }
    }
}

/// Editor camera navigation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near_clip: f32,
    /// Far clipping plane
    pub far_clip: f32,
    /// Initial orbit distance from the focal point
    pub distance: f32,
    /// Focal point translation speed in units per second (WASD/QE)
    pub movement_speed: f32,
    /// Radians of yaw/pitch per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Initial viewport width in pixels
    pub viewport_width: f32,
    /// Initial viewport height in pixels
    pub viewport_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near_clip: 0.1,
            far_clip: 1000.0,
            distance: 10.0,
            movement_speed: 5.0,
            mouse_sensitivity: 0.003,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl CameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("Field of view must be in (0, 180), got {}", self.fov_degrees)));
        }
        if self.near_clip <= 0.0 || self.far_clip <= self.near_clip {
            return Err(ConfigError::Invalid(format!(
                "Clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near_clip, self.far_clip
            )));
        }
        if self.distance < 1.0 {
            return Err(ConfigError::Invalid(format!("Camera distance must be at least 1.0, got {}", self.distance)));
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid("Viewport size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Gizmo snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Whether snapping starts enabled
    pub snap_enabled: bool,
    /// Translation snap in world units
    pub translate_snap: f32,
    /// Rotation snap in degrees
    pub rotate_snap: f32,
    /// Scale snap increment
    pub scale_snap: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            snap_enabled: false,
            translate_snap: 0.5,
            rotate_snap: 15.0,
            scale_snap: 0.1,
        }
    }
}

impl GizmoConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translate_snap <= 0.0 || self.rotate_snap <= 0.0 || self.scale_snap <= 0.0 {
            return Err(ConfigError::Invalid("Snap increments must be positive".to_string()));
        }
        Ok(())
    }
}
