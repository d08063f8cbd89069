//! Orbital editor camera
//!
//! The camera orbits a focal point at a distance. Yaw and pitch orient it,
//! and its position is always derived from those:
//! `position = focal_point - forward * distance`.
//!
//! ## Controls
//! - Right mouse held: orbit with pointer motion, fly the focal point with WASD/QE
//! - Middle mouse held: pan in the view plane, scaled by distance
//! - Wheel: zoom toward the focal point, pushing it forward below distance 1
//!
//! Orbit is checked before pan, so holding both buttons orbits.

use nalgebra::{Isometry3, Translation3};

use crate::config::CameraConfig;
use crate::foundation::math::{perspective, quat_from_euler, utils::deg_to_rad, Mat4, Quat, Vec2, Vec3};

use super::input::{CameraInput, KeyCode, MouseButton};

/// Closest the camera may get to its focal point
pub const MIN_DISTANCE: f32 = 1.0;

/// Navigation state for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// No navigation button held
    #[default]
    Idle,
    /// Right button held: rotating around the focal point
    Orbiting,
    /// Middle button held: translating the focal point in the view plane
    Panning,
}

/// Pan speed factor for one viewport dimension in pixels
///
/// Quadratic in thousands of pixels, clamped at 2400 px.
pub fn pan_factor(dimension: f32) -> f32 {
    let v = (dimension / 1000.0).min(2.4);
    0.0366 * v * v - 0.1778 * v + 0.3021
}

/// Editor navigation camera
#[derive(Debug, Clone)]
pub struct EditorCamera {
    fov_degrees: f32,
    aspect_ratio: f32,
    near_clip: f32,
    far_clip: f32,

    focal_point: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,

    viewport_width: f32,
    viewport_height: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,

    last_mouse_position: Option<Vec2>,
    mode: CameraMode,

    position: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Default for EditorCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl EditorCamera {
    /// Create a camera looking down -Z at the origin from the configured distance
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            fov_degrees: config.fov_degrees,
            aspect_ratio: config.viewport_width / config.viewport_height,
            near_clip: config.near_clip,
            far_clip: config.far_clip,
            focal_point: Vec3::zeros(),
            distance: config.distance.max(MIN_DISTANCE),
            yaw: 0.0,
            pitch: 0.0,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            last_mouse_position: None,
            mode: CameraMode::Idle,
            position: Vec3::zeros(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        camera.update_projection();
        camera.update_view();
        camera
    }

    /// Consume one frame of input and recompute the matrices
    pub fn update(&mut self, delta_time: f32, input: &CameraInput) {
        let mouse = input.mouse_position;
        let delta = self.last_mouse_position.map_or_else(Vec2::zeros, |last| mouse - last);
        self.last_mouse_position = Some(mouse);

        if input.is_mouse_button_down(MouseButton::Right) {
            self.mode = CameraMode::Orbiting;
            self.fly(delta_time, input);
            if delta.x != 0.0 || delta.y != 0.0 {
                self.mouse_rotate(delta);
            }
        } else if input.is_mouse_button_down(MouseButton::Middle) {
            self.mode = CameraMode::Panning;
            self.mouse_pan(delta);
        } else {
            self.mode = CameraMode::Idle;
        }

        if input.wheel_delta != 0.0 {
            self.mouse_zoom(input.wheel_delta);
        }

        self.update_view();
    }

    /// Resize the viewport; zero-sized viewports are ignored
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::trace!("Ignoring zero-sized viewport {}x{}", width, height);
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_projection();
    }

    /// Move the focal point, keeping orientation and distance
    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
        self.update_view();
    }

    /// Set the orbit distance, clamped to [`MIN_DISTANCE`]
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(MIN_DISTANCE);
        self.update_view();
    }

    /// Set yaw and pitch in radians
    pub fn set_rotation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        self.update_view();
    }

    /// Pan factors `(x, y)` for the current viewport size
    pub fn pan_speed(&self) -> (f32, f32) {
        (pan_factor(self.viewport_width), pan_factor(self.viewport_height))
    }

    /// Rotation speed reported to the UI
    pub fn rotation_speed(&self) -> f32 {
        0.8
    }

    /// Distance removed per unit of wheel delta at the current distance
    pub fn zoom_speed(&self) -> f32 {
        let distance = (self.distance * 0.2).max(0.0);
        (distance * distance).min(100.0)
    }

    /// Orientation built from `(-pitch, -yaw, 0)` Euler angles
    pub fn orientation(&self) -> Quat {
        quat_from_euler(&Vec3::new(-self.pitch, -self.yaw, 0.0))
    }

    /// Camera forward, `-Z` rotated by the orientation
    pub fn forward_direction(&self) -> Vec3 {
        self.orientation() * Vec3::new(0.0, 0.0, -1.0)
    }

    /// Camera right, `+X` rotated by the orientation
    pub fn right_direction(&self) -> Vec3 {
        self.orientation() * Vec3::new(1.0, 0.0, 0.0)
    }

    /// Camera up, `+Y` rotated by the orientation
    pub fn up_direction(&self) -> Vec3 {
        self.orientation() * Vec3::new(0.0, 1.0, 0.0)
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// World-space camera position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point the camera orbits around
    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    /// Distance from the focal point
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Yaw in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Navigation state from the last update
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Viewport width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn fly(&mut self, delta_time: f32, input: &CameraInput) {
        let forward = self.forward_direction();
        let right = self.right_direction();
        let up = Vec3::y();
        let speed = self.movement_speed * delta_time;

        let moves = [
            (KeyCode::W, forward),
            (KeyCode::S, -forward),
            (KeyCode::A, -right),
            (KeyCode::D, right),
            (KeyCode::E, up),
            (KeyCode::Q, -up),
        ];
        for (key, direction) in moves {
            if input.is_key_down(key) {
                self.focal_point += direction * speed;
            }
        }
    }

    fn mouse_rotate(&mut self, delta: Vec2) {
        let yaw_sign = if self.up_direction().y < 0.0 { -1.0 } else { 1.0 };
        self.yaw += yaw_sign * delta.x * self.mouse_sensitivity;
        self.pitch += delta.y * self.mouse_sensitivity;
    }

    fn mouse_pan(&mut self, delta: Vec2) {
        let (x_speed, y_speed) = self.pan_speed();
        self.focal_point += -self.right_direction() * delta.x * x_speed * self.distance;
        self.focal_point += self.up_direction() * delta.y * y_speed * self.distance;
    }

    fn mouse_zoom(&mut self, delta: f32) {
        self.distance -= delta * self.zoom_speed();
        if self.distance < MIN_DISTANCE {
            self.focal_point += self.forward_direction();
            self.distance = MIN_DISTANCE;
        }
    }

    fn update_projection(&mut self) {
        self.aspect_ratio = self.viewport_width / self.viewport_height;
        self.projection = perspective(deg_to_rad(self.fov_degrees), self.aspect_ratio, self.near_clip, self.far_clip);
    }

    fn update_view(&mut self) {
        let orientation = self.orientation();
        self.position = self.focal_point - orientation * Vec3::new(0.0, 0.0, -1.0) * self.distance;
        let camera_to_world = Isometry3::from_parts(Translation3::from(self.position), orientation);
        self.view = camera_to_world.inverse().to_homogeneous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    const EPSILON: f32 = 1e-4;

    fn camera() -> EditorCamera {
        EditorCamera::default()
    }

    fn orbit_at(x: f32, y: f32) -> CameraInput {
        CameraInput::new()
            .with_mouse_button(MouseButton::Right)
            .with_mouse_position(x, y)
    }

    #[test]
    fn test_default_position_is_behind_focal_point() {
        let camera = camera();
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0), epsilon = EPSILON);
        assert_relative_eq!(camera.forward_direction(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_eq!(camera.mode(), CameraMode::Idle);
    }

    #[test]
    fn test_view_maps_position_to_origin_and_focal_point_ahead() {
        let mut camera = camera();
        camera.set_rotation(0.4, -0.3);
        camera.set_focal_point(Vec3::new(1.0, 2.0, 3.0));

        let view = camera.view_matrix();
        let eye = view.transform_point(&Point3::from(camera.position()));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = EPSILON);

        let focal = view.transform_point(&Point3::from(camera.focal_point()));
        assert_relative_eq!(focal.coords, Vec3::new(0.0, 0.0, -camera.distance()), epsilon = EPSILON);
    }

    #[test]
    fn test_position_invariant_after_navigation() {
        let mut camera = camera();
        camera.update(0.016, &orbit_at(0.0, 0.0));
        camera.update(0.016, &orbit_at(40.0, -25.0).with_key(KeyCode::W).with_key(KeyCode::E));
        camera.update(0.016, &CameraInput::new().with_wheel(0.5));

        let expected = camera.focal_point() - camera.forward_direction() * camera.distance();
        assert_relative_eq!(camera.position(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_zoom_scenario_from_ten() {
        let mut camera = camera();
        assert_relative_eq!(camera.zoom_speed(), 4.0, epsilon = EPSILON);
        camera.update(0.016, &CameraInput::new().with_wheel(1.0));
        assert_relative_eq!(camera.distance(), 6.0, epsilon = EPSILON);
    }

    #[test]
    fn test_zoom_is_monotonic_and_clamped() {
        let mut camera = camera();
        let mut previous = camera.distance();
        for _ in 0..40 {
            camera.update(0.016, &CameraInput::new().with_wheel(1.0));
            assert!(camera.distance() <= previous);
            assert!(camera.distance() >= MIN_DISTANCE);
            previous = camera.distance();
        }
        assert_eq!(camera.distance(), MIN_DISTANCE);
    }

    #[test]
    fn test_zoom_past_minimum_pushes_focal_point_forward() {
        let mut camera = camera();
        camera.set_distance(1.5);
        let focal = camera.focal_point();
        let forward = camera.forward_direction();

        // zoom speed at 1.5 is 0.09, so a delta of 10 overshoots
        camera.update(0.016, &CameraInput::new().with_wheel(10.0));

        assert_eq!(camera.distance(), MIN_DISTANCE);
        assert_relative_eq!(camera.focal_point(), focal + forward, epsilon = EPSILON);
    }

    #[test]
    fn test_zoom_speed_caps_at_hundred() {
        let mut camera = camera();
        camera.set_distance(500.0);
        assert_eq!(camera.zoom_speed(), 100.0);
    }

    #[test]
    fn test_pan_factor_curve() {
        assert_relative_eq!(pan_factor(1000.0), 0.1609, epsilon = 1e-5);
        assert_relative_eq!(pan_factor(0.0), 0.3021, epsilon = 1e-6);
        assert_eq!(pan_factor(2400.0), pan_factor(2400.5));
        assert_eq!(pan_factor(2400.0), pan_factor(10_000.0));
    }

    #[test]
    fn test_first_orbit_tick_consumes_no_delta() {
        let mut camera = camera();
        camera.update(0.016, &orbit_at(300.0, 200.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.mode(), CameraMode::Orbiting);
    }

    #[test]
    fn test_orbit_uses_inter_tick_delta() {
        let mut camera = camera();
        let sensitivity = CameraConfig::default().mouse_sensitivity;
        camera.update(0.016, &orbit_at(100.0, 100.0));
        camera.update(0.016, &orbit_at(110.0, 95.0));
        assert_relative_eq!(camera.yaw(), 10.0 * sensitivity, epsilon = 1e-6);
        assert_relative_eq!(camera.pitch(), -5.0 * sensitivity, epsilon = 1e-6);

        // Pointer motion while idle is not replayed on the next orbit tick
        camera.update(0.016, &CameraInput::new().with_mouse_position(500.0, 500.0));
        camera.update(0.016, &orbit_at(500.0, 500.0));
        assert_relative_eq!(camera.yaw(), 10.0 * sensitivity, epsilon = 1e-6);
    }

    #[test]
    fn test_yaw_inverts_when_upside_down() {
        let mut camera = camera();
        camera.set_rotation(0.0, std::f32::consts::PI);
        assert!(camera.up_direction().y < 0.0);

        let sensitivity = CameraConfig::default().mouse_sensitivity;
        camera.update(0.016, &orbit_at(0.0, 0.0));
        camera.update(0.016, &orbit_at(10.0, 0.0));
        assert_relative_eq!(camera.yaw(), -10.0 * sensitivity, epsilon = 1e-6);
    }

    #[test]
    fn test_pan_moves_focal_point_in_view_plane() {
        let mut camera = camera();
        let pan = |x, y| CameraInput::new().with_mouse_button(MouseButton::Middle).with_mouse_position(x, y);
        camera.update(0.016, &pan(0.0, 0.0));
        camera.update(0.016, &pan(10.0, 0.0));

        let (x_speed, _) = camera.pan_speed();
        assert_eq!(camera.mode(), CameraMode::Panning);
        assert_relative_eq!(
            camera.focal_point(),
            Vec3::new(-10.0 * x_speed * 10.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_orbit_wins_over_pan() {
        let mut camera = camera();
        let both = |x, y| {
            orbit_at(x, y).with_mouse_button(MouseButton::Middle)
        };
        camera.update(0.016, &both(0.0, 0.0));
        camera.update(0.016, &both(20.0, 0.0));

        assert_eq!(camera.mode(), CameraMode::Orbiting);
        assert_relative_eq!(camera.focal_point(), Vec3::zeros(), epsilon = EPSILON);
        assert!(camera.yaw() > 0.0);
    }

    #[test]
    fn test_fly_requires_orbit_button() {
        let mut camera = camera();
        camera.update(1.0, &CameraInput::new().with_key(KeyCode::W));
        assert_relative_eq!(camera.focal_point(), Vec3::zeros(), epsilon = EPSILON);

        camera.update(1.0, &orbit_at(0.0, 0.0).with_key(KeyCode::W));
        let speed = CameraConfig::default().movement_speed;
        assert_relative_eq!(camera.focal_point(), Vec3::new(0.0, 0.0, -speed), epsilon = EPSILON);
    }

    #[test]
    fn test_zero_viewport_is_ignored() {
        let mut camera = camera();
        let projection = *camera.projection();
        camera.set_viewport_size(0.0, 720.0);
        assert_eq!(camera.projection(), &projection);

        camera.set_viewport_size(800.0, 800.0);
        assert_relative_eq!(camera.aspect_ratio(), 1.0);
    }
}
