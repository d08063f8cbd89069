//! Physics components
//!
//! Only the scene's Euler integration stub reads these; collision shapes are
//! carried for tooling and persistence.

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Dynamic body state
#[derive(Debug, Clone, PartialEq)]
pub struct RigidbodyComponent {
    /// Mass in kilograms
    pub mass: f32,
    /// Linear drag
    pub drag: f32,
    /// Angular drag
    pub angular_drag: f32,
    /// Whether gravity accelerates the body
    pub use_gravity: bool,
    /// Kinematic bodies ignore gravity
    pub is_kinematic: bool,
    /// Linear velocity in units per second
    pub velocity: Vec3,
    /// Angular velocity in radians per second
    pub angular_velocity: Vec3,
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            use_gravity: true,
            is_kinematic: false,
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
        }
    }
}

impl Component for RigidbodyComponent {}

/// Collision shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColliderType {
    /// Axis-aligned box of `size`
    #[default]
    Box = 0,
    /// Sphere with diameter `size.x`
    Sphere = 1,
    /// Capsule along Y
    Capsule = 2,
    /// Mesh collider from the renderer's model
    Mesh = 3,
}

/// Collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// Shape kind
    pub collider_type: ColliderType,
    /// Shape extents
    pub size: Vec3,
    /// Local-space offset
    pub center: Vec3,
    /// Triggers report overlaps without blocking
    pub is_trigger: bool,
}

impl Default for ColliderComponent {
    fn default() -> Self {
        Self {
            collider_type: ColliderType::Box,
            size: Vec3::new(1.0, 1.0, 1.0),
            center: Vec3::zeros(),
            is_trigger: false,
        }
    }
}

impl Component for ColliderComponent {}
