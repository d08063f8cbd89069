//! Lighting component for ECS
//!
//! Pure data; the light's direction and position come from the owning
//! entity's transform.

use crate::ecs::Component;
use crate::foundation::math::{Vec2, Vec3};

/// Light parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LightComponent {
    /// The kind of light
    pub light_type: LightType,
    /// RGB color values (0.0 to 1.0 range)
    pub color: Vec3,
    /// Light intensity multiplier
    pub intensity: f32,
    /// Maximum range for point/spot lights
    pub range: f32,
    /// Distance attenuation factor for point/spot lights
    pub attenuation: f32,
    /// Inner cone angle for spot lights in degrees
    pub inner_cone_angle: f32,
    /// Outer cone angle for spot lights in degrees
    pub outer_cone_angle: f32,
    /// Emitter size for area lights
    pub area_size: Vec2,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            light_type: LightType::Point,
            color: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            range: 10.0,
            attenuation: 1.0,
            inner_cone_angle: 30.0,
            outer_cone_angle: 45.0,
            area_size: Vec2::new(1.0, 1.0),
        }
    }
}

impl Component for LightComponent {}

/// Types of lights, with their persisted integer codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum LightType {
    /// Parallel rays, like sunlight
    Directional = 0,
    /// Radiates in all directions from a position
    #[default]
    Point = 1,
    /// Cone of light from a position
    Spot = 2,
    /// Rectangular emitter
    Area = 3,
}

impl LightType {
    /// Persisted integer code
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for LightType {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Directional),
            1 => Ok(Self::Point),
            2 => Ok(Self::Spot),
            3 => Ok(Self::Area),
            other => Err(other),
        }
    }
}

/// Factory functions for common light setups
pub struct LightFactory;

impl LightFactory {
    /// Directional light; orient it with the entity transform
    pub fn directional(color: Vec3, intensity: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Directional,
            color,
            intensity,
            ..Default::default()
        }
    }

    /// Point light with a falloff range
    pub fn point(color: Vec3, intensity: f32, range: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Point,
            color,
            intensity,
            range,
            ..Default::default()
        }
    }

    /// Spot light with cone angles in degrees
    pub fn spot(color: Vec3, intensity: f32, range: f32, inner_cone_angle: f32, outer_cone_angle: f32) -> LightComponent {
        LightComponent {
            light_type: LightType::Spot,
            color,
            intensity,
            range,
            inner_cone_angle,
            outer_cone_angle,
            ..Default::default()
        }
    }
}
