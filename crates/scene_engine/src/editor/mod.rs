//! Editor core: input snapshots, the orbital camera, the transform gizmo
//! pipeline and the viewport frame loop that ties them to a scene.

pub mod input;
pub mod camera;
pub mod gizmo;
pub mod viewport;

pub use input::{CameraInput, KeyCode, MouseButton, ScreenRect, ViewportInput};
pub use camera::{pan_factor, CameraMode, EditorCamera, MIN_DISTANCE};
pub use gizmo::{
    apply_matrix, operation_for_key, GizmoMode, GizmoOperation, GizmoOutcome, GizmoOverlay, GizmoPipeline,
    GizmoRequest, ScriptedGizmo, SnapSettings,
};
pub use viewport::{ViewportFrame, ViewportPanel};
