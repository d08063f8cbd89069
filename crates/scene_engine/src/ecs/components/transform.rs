//! Transform component for the ECS system
//!
//! Stores translation, XYZ Euler rotation (radians) and scale as separate
//! fields. The matrix is always derived from them, never stored, so the
//! fields stay authoritative after gizmo edits.

use crate::ecs::Component;
use crate::foundation::math::{compose, quat_from_euler, utils::deg_to_rad, Mat4, Quat, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub translation: Vec3,

    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from translation only
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// `Translate * Rotate * Scale` matrix
    pub fn transform(&self) -> Mat4 {
        compose(&self.translation, &self.rotation, &self.scale)
    }

    /// Rotation as a quaternion
    pub fn orientation(&self) -> Quat {
        quat_from_euler(&self.rotation)
    }

    /// Builder pattern: Set translation
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Builder pattern: Set rotation from Euler angles in radians
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from Euler angles in degrees
    pub fn with_rotation_degrees(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(deg_to_rad(x), deg_to_rad(y), deg_to_rad(z));
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }
}

/// Transform factory for common editor placements
pub struct TransformFactory;

impl TransformFactory {
    /// Camera placed at `position` looking down -Z
    pub fn camera(position: Vec3) -> TransformComponent {
        TransformComponent::from_translation(position)
    }

    /// Directional light tilted by pitch and yaw in degrees
    ///
    /// Position is irrelevant for directional lights and stays at the origin.
    pub fn directional_light(pitch_degrees: f32, yaw_degrees: f32) -> TransformComponent {
        TransformComponent::identity().with_rotation_degrees(pitch_degrees, yaw_degrees, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_default_is_identity() {
        let transform = TransformComponent::default();
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(transform.transform(), Mat4::identity());
    }

    #[test]
    fn test_transform_moves_origin_to_translation() {
        let transform = TransformComponent::from_translation(Vec3::new(0.0, 2.0, 10.0))
            .with_rotation_degrees(0.0, 90.0, 0.0)
            .with_uniform_scale(3.0);
        let origin = transform.transform().transform_point(&Point3::origin());
        assert_relative_eq!(origin.coords, Vec3::new(0.0, 2.0, 10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_directional_light_factory() {
        let transform = TransformFactory::directional_light(-45.0, -30.0);
        assert_relative_eq!(transform.rotation.x, -std::f32::consts::FRAC_PI_4, epsilon = 1e-6);
        assert_relative_eq!(transform.rotation.y, -std::f32::consts::FRAC_PI_6, epsilon = 1e-6);
        assert_eq!(transform.translation, Vec3::zeros());
    }
}
