//! Transform gizmo pipeline
//!
//! The on-screen widget is an external overlay. Each frame the pipeline
//! composes the selected entity's matrix, lets the overlay edit it, and while
//! a drag is active decomposes the result back into the entity's
//! translation, Euler rotation and scale. This is the only path by which
//! gizmo edits reach a [`TransformComponent`].

use std::collections::VecDeque;

use crate::config::GizmoConfig;
use crate::ecs::components::TransformComponent;
use crate::ecs::Entity;
use crate::foundation::math::{decompose, Mat4};
use crate::scene::Scene;

use super::camera::EditorCamera;
use super::input::{KeyCode, ScreenRect};

/// Skew or perspective magnitude above which a decomposition is reported
pub const RESIDUAL_TOLERANCE: f32 = 1e-3;

/// Active manipulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoOperation {
    /// Gizmo hidden
    None,
    /// Move along local axes
    #[default]
    Translate,
    /// Rotate about local axes
    Rotate,
    /// Scale along local axes
    Scale,
}

/// Space the gizmo axes are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoMode {
    /// Entity-local axes
    #[default]
    Local,
}

/// Snapping increments, one per operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    /// Whether snapping is on
    pub enabled: bool,
    /// Translation increment in world units
    pub translate: f32,
    /// Rotation increment in degrees
    pub rotate: f32,
    /// Scale increment
    pub scale: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self::from(&GizmoConfig::default())
    }
}

impl From<&GizmoConfig> for SnapSettings {
    fn from(config: &GizmoConfig) -> Self {
        Self {
            enabled: config.snap_enabled,
            translate: config.translate_snap,
            rotate: config.rotate_snap,
            scale: config.scale_snap,
        }
    }
}

impl SnapSettings {
    /// Increment for `operation`, or `None` when snapping is off
    pub fn snap_for(&self, operation: GizmoOperation) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        match operation {
            GizmoOperation::None => None,
            GizmoOperation::Translate => Some(self.translate),
            GizmoOperation::Rotate => Some(self.rotate),
            GizmoOperation::Scale => Some(self.scale),
        }
    }
}

/// Everything the overlay needs to draw and hit-test the gizmo
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoRequest {
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Viewport area the gizmo is drawn into
    pub rect: ScreenRect,
    /// Manipulation to offer
    pub operation: GizmoOperation,
    /// Axis space
    pub mode: GizmoMode,
    /// Uniform snap increment for the operation
    pub snap: Option<f32>,
}

/// On-screen gizmo widget supplied by the UI layer
pub trait GizmoOverlay {
    /// Draw the gizmo and apply any drag to `transform`
    ///
    /// Returns whether a drag is in progress this frame.
    fn manipulate(&mut self, request: &GizmoRequest, transform: &mut Mat4) -> bool;

    /// Pointer is over a gizmo handle
    fn is_over(&self) -> bool;

    /// A drag is in progress
    fn is_using(&self) -> bool;
}

/// Result of one pipeline evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoOutcome {
    /// Preconditions not met; nothing shown
    Skipped,
    /// Gizmo shown, no drag in progress
    Idle,
    /// Drag applied to the transform
    Applied,
    /// Edited matrix could not be decomposed; transform untouched
    Rejected,
}

/// Hotkey mapping: W translate, E rotate, R scale
pub fn operation_for_key(key: KeyCode) -> Option<GizmoOperation> {
    match key {
        KeyCode::W => Some(GizmoOperation::Translate),
        KeyCode::E => Some(GizmoOperation::Rotate),
        KeyCode::R => Some(GizmoOperation::Scale),
        _ => None,
    }
}

/// Overwrite `transform` with the decomposition of `matrix`
///
/// Skew and perspective are dropped; a warning is logged when they exceed
/// `tolerance`. Returns `false` and leaves `transform` unchanged when the
/// matrix cannot be decomposed.
pub fn apply_matrix(transform: &mut TransformComponent, matrix: &Mat4, tolerance: f32) -> bool {
    let Some(decomposed) = decompose(matrix) else {
        return false;
    };

    if decomposed.has_residual_terms(tolerance) {
        log::warn!(
            "Discarding non-TRS terms from gizmo edit (skew {:?}, perspective {:?})",
            decomposed.skew,
            decomposed.perspective
        );
    }

    transform.translation = decomposed.translation;
    transform.rotation = decomposed.euler_rotation();
    transform.scale = decomposed.scale;
    true
}

/// Gizmo state and the decomposition write-back
#[derive(Debug, Clone)]
pub struct GizmoPipeline {
    operation: GizmoOperation,
    mode: GizmoMode,
    snap: SnapSettings,
}

impl Default for GizmoPipeline {
    fn default() -> Self {
        Self::from_config(&GizmoConfig::default())
    }
}

impl GizmoPipeline {
    /// Translate gizmo with configured snapping
    pub fn from_config(config: &GizmoConfig) -> Self {
        Self {
            operation: GizmoOperation::Translate,
            mode: GizmoMode::Local,
            snap: SnapSettings::from(config),
        }
    }

    /// Current operation
    pub fn operation(&self) -> GizmoOperation {
        self.operation
    }

    /// Change the operation
    pub fn set_operation(&mut self, operation: GizmoOperation) {
        if self.operation != operation {
            log::debug!("Gizmo operation {:?} -> {:?}", self.operation, operation);
        }
        self.operation = operation;
    }

    /// Snapping settings
    pub fn snap(&self) -> &SnapSettings {
        &self.snap
    }

    /// Mutable snapping settings
    pub fn snap_mut(&mut self) -> &mut SnapSettings {
        &mut self.snap
    }

    /// Apply a hotkey; returns whether it changed the operation
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match operation_for_key(key) {
            Some(operation) => {
                self.set_operation(operation);
                true
            }
            None => false,
        }
    }

    /// Run the gizmo for one frame
    pub fn evaluate(
        &self,
        scene: &mut Scene,
        selection: Option<Entity>,
        camera: &EditorCamera,
        rect: ScreenRect,
        overlay: &mut dyn GizmoOverlay,
    ) -> GizmoOutcome {
        if self.operation == GizmoOperation::None {
            return GizmoOutcome::Skipped;
        }
        let Some(entity) = selection else {
            return GizmoOutcome::Skipped;
        };
        let Some(transform) = scene.store().get_component::<TransformComponent>(entity) else {
            return GizmoOutcome::Skipped;
        };

        let mut matrix = transform.transform();
        let request = GizmoRequest {
            view: *camera.view_matrix(),
            projection: *camera.projection(),
            rect,
            operation: self.operation,
            mode: self.mode,
            snap: self.snap.snap_for(self.operation),
        };

        if !overlay.manipulate(&request, &mut matrix) {
            return GizmoOutcome::Idle;
        }

        let Some(transform) = scene.store_mut().get_component_mut::<TransformComponent>(entity) else {
            return GizmoOutcome::Skipped;
        };
        if apply_matrix(transform, &matrix, RESIDUAL_TOLERANCE) {
            GizmoOutcome::Applied
        } else {
            log::error!("Gizmo produced a matrix that cannot be decomposed; edit ignored");
            GizmoOutcome::Rejected
        }
    }
}

/// Overlay that replays queued drags, for headless sessions and tests
///
/// Each queued matrix is one drag frame: it is pre-multiplied onto the
/// entity's matrix, i.e. applied in world space.
#[derive(Debug, Default)]
pub struct ScriptedGizmo {
    pending: VecDeque<Mat4>,
    using: bool,
    last_request: Option<GizmoRequest>,
}

impl ScriptedGizmo {
    /// Overlay with no queued drags
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one drag frame
    pub fn push_drag(&mut self, delta: Mat4) {
        self.pending.push_back(delta);
    }

    /// Request received on the most recent frame
    pub fn last_request(&self) -> Option<&GizmoRequest> {
        self.last_request.as_ref()
    }
}

impl GizmoOverlay for ScriptedGizmo {
    fn manipulate(&mut self, request: &GizmoRequest, transform: &mut Mat4) -> bool {
        self.last_request = Some(request.clone());
        match self.pending.pop_front() {
            Some(delta) => {
                *transform = delta * *transform;
                self.using = true;
            }
            None => self.using = false,
        }
        self.using
    }

    fn is_over(&self) -> bool {
        self.using
    }

    fn is_using(&self) -> bool {
        self.using
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec3, Vec4};
    use crate::scene::IdentitySource;
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Vector3};

    const EPSILON: f32 = 1e-4;

    fn setup() -> (Scene, Entity, EditorCamera) {
        let mut scene = Scene::with_identity_source("Gizmo", IdentitySource::seeded(3));
        let entity = scene.create_entity("Cube");
        (scene, entity, EditorCamera::default())
    }

    fn transform_of(scene: &Scene, entity: Entity) -> TransformComponent {
        scene.entity(entity).unwrap().component::<TransformComponent>().clone()
    }

    #[test]
    fn test_operation_for_key() {
        assert_eq!(operation_for_key(KeyCode::W), Some(GizmoOperation::Translate));
        assert_eq!(operation_for_key(KeyCode::E), Some(GizmoOperation::Rotate));
        assert_eq!(operation_for_key(KeyCode::R), Some(GizmoOperation::Scale));
        assert_eq!(operation_for_key(KeyCode::A), None);
    }

    #[test]
    fn test_snap_for_operation() {
        let mut snap = SnapSettings::default();
        assert_eq!(snap.snap_for(GizmoOperation::Translate), None);

        snap.enabled = true;
        assert_eq!(snap.snap_for(GizmoOperation::Translate), Some(0.5));
        assert_eq!(snap.snap_for(GizmoOperation::Rotate), Some(15.0));
        assert_eq!(snap.snap_for(GizmoOperation::Scale), Some(0.1));
        assert_eq!(snap.snap_for(GizmoOperation::None), None);
    }

    #[test]
    fn test_skipped_without_preconditions() {
        let (mut scene, entity, camera) = setup();
        let mut overlay = ScriptedGizmo::new();
        let mut pipeline = GizmoPipeline::default();
        let rect = ScreenRect::new(0.0, 0.0, 1280.0, 720.0);

        assert_eq!(pipeline.evaluate(&mut scene, None, &camera, rect, &mut overlay), GizmoOutcome::Skipped);

        pipeline.set_operation(GizmoOperation::None);
        assert_eq!(
            pipeline.evaluate(&mut scene, Some(entity), &camera, rect, &mut overlay),
            GizmoOutcome::Skipped
        );

        pipeline.set_operation(GizmoOperation::Translate);
        scene.destroy_entity(entity);
        assert_eq!(
            pipeline.evaluate(&mut scene, Some(entity), &camera, rect, &mut overlay),
            GizmoOutcome::Skipped
        );
        assert!(overlay.last_request().is_none());
    }

    #[test]
    fn test_request_carries_camera_and_snap() {
        let (mut scene, entity, camera) = setup();
        let mut overlay = ScriptedGizmo::new();
        let mut pipeline = GizmoPipeline::default();
        pipeline.snap_mut().enabled = true;
        pipeline.handle_key(KeyCode::E);
        let rect = ScreenRect::new(10.0, 20.0, 640.0, 480.0);

        let outcome = pipeline.evaluate(&mut scene, Some(entity), &camera, rect, &mut overlay);
        assert_eq!(outcome, GizmoOutcome::Idle);

        let request = overlay.last_request().unwrap();
        assert_eq!(request.operation, GizmoOperation::Rotate);
        assert_eq!(request.mode, GizmoMode::Local);
        assert_eq!(request.snap, Some(15.0));
        assert_eq!(request.rect, rect);
        assert_eq!(&request.view, camera.view_matrix());
        assert_eq!(transform_of(&scene, entity), TransformComponent::default());
    }

    #[test]
    fn test_translate_drag_writes_back() {
        let (mut scene, entity, camera) = setup();
        let mut overlay = ScriptedGizmo::new();
        overlay.push_drag(Mat4::new_translation(&Vec3::new(1.5, 0.0, -2.0)));

        let outcome = GizmoPipeline::default().evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay);

        assert_eq!(outcome, GizmoOutcome::Applied);
        assert!(overlay.is_using());
        let transform = transform_of(&scene, entity);
        assert_relative_eq!(transform.translation, Vec3::new(1.5, 0.0, -2.0), epsilon = EPSILON);
        assert_relative_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_translate_drag_on_tiny_scale() {
        let (mut scene, entity, camera) = setup();
        let tiny = Vec3::new(0.001, 0.001, 0.001);
        scene.entity_mut(entity).unwrap().component_mut::<TransformComponent>().scale = tiny;
        let mut overlay = ScriptedGizmo::new();
        overlay.push_drag(Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0)));

        let outcome = GizmoPipeline::default().evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay);

        assert_eq!(outcome, GizmoOutcome::Applied);
        let transform = transform_of(&scene, entity);
        assert_relative_eq!(transform.translation, Vec3::new(0.0, 3.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.scale, tiny, max_relative = 1e-3);
    }

    #[test]
    fn test_rotate_drag_recovers_euler() {
        let (mut scene, entity, camera) = setup();
        let mut overlay = ScriptedGizmo::new();
        let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), 0.6);
        overlay.push_drag(turn.to_homogeneous());

        let mut pipeline = GizmoPipeline::default();
        pipeline.set_operation(GizmoOperation::Rotate);
        assert_eq!(
            pipeline.evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay),
            GizmoOutcome::Applied
        );

        let transform = transform_of(&scene, entity);
        assert_relative_eq!(transform.rotation, Vec3::new(0.0, 0.6, 0.0), epsilon = EPSILON);
        assert_relative_eq!(transform.transform(), turn.to_homogeneous(), epsilon = EPSILON);
    }

    #[test]
    fn test_drag_frames_accumulate_then_release() {
        let (mut scene, entity, camera) = setup();
        let mut overlay = ScriptedGizmo::new();
        let step = Mat4::new_nonuniform_scaling(&Vec3::new(1.5, 1.0, 1.0));
        overlay.push_drag(step);
        overlay.push_drag(step);

        let pipeline = GizmoPipeline::default();
        for _ in 0..2 {
            pipeline.evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay);
        }
        let outcome = pipeline.evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay);

        assert_eq!(outcome, GizmoOutcome::Idle);
        assert!(!overlay.is_using());
        assert_relative_eq!(transform_of(&scene, entity).scale, Vec3::new(2.25, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_skew_is_discarded() {
        let mut transform = TransformComponent::default();
        let mut sheared = Mat4::identity();
        sheared[(0, 1)] = 0.5;
        sheared[(0, 3)] = 3.0;

        assert!(apply_matrix(&mut transform, &sheared, RESIDUAL_TOLERANCE));
        assert_relative_eq!(transform.translation, Vec3::new(3.0, 0.0, 0.0), epsilon = EPSILON);
        // Recomposition is rigid: the shear is gone, the basis stays orthogonal
        let rebuilt = transform.transform();
        let x_axis = rebuilt.fixed_view::<3, 1>(0, 0).into_owned();
        let y_axis = rebuilt.fixed_view::<3, 1>(0, 1).into_owned();
        assert_relative_eq!(x_axis.dot(&y_axis), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_row_is_discarded() {
        let mut transform = TransformComponent::default();
        let mut projective = Mat4::new_translation(&Vec3::new(0.0, 1.0, 0.0));
        projective.set_row(3, &Vec4::new(0.0, 0.0, 0.01, 1.0).transpose());

        assert!(apply_matrix(&mut transform, &projective, RESIDUAL_TOLERANCE));
        assert_relative_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_drag_is_rejected() {
        let (mut scene, entity, camera) = setup();
        scene
            .entity_mut(entity)
            .unwrap()
            .component_mut::<TransformComponent>()
            .translation = Vec3::new(4.0, 5.0, 6.0);

        let mut overlay = ScriptedGizmo::new();
        overlay.push_drag(Mat4::new_nonuniform_scaling(&Vec3::new(0.0, 1.0, 1.0)));
        let mut pipeline = GizmoPipeline::default();
        pipeline.set_operation(GizmoOperation::Scale);

        let outcome = pipeline.evaluate(&mut scene, Some(entity), &camera, ScreenRect::default(), &mut overlay);

        assert_eq!(outcome, GizmoOutcome::Rejected);
        assert_eq!(transform_of(&scene, entity).translation, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(transform_of(&scene, entity).scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_near_degenerate_scale_survives() {
        let mut transform = TransformComponent::default();
        let tiny = Mat4::new_nonuniform_scaling(&Vec3::new(1e-2, 1.0, 1.0));
        assert!(apply_matrix(&mut transform, &tiny, RESIDUAL_TOLERANCE));
        assert_relative_eq!(transform.scale, Vec3::new(1e-2, 1.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(transform.rotation, Vec3::zeros(), epsilon = 1e-4);
    }
}
