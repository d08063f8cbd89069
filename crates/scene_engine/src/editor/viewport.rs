//! Viewport panel: the per-frame driver for camera, gizmo and scene rendering
//!
//! One frame runs, in order: target resize, gizmo hotkeys, editor camera
//! update, gizmo evaluation, render traversal.

use crate::assets::{BuiltinMesh, ModelFormat};
use crate::config::EditorConfig;
use crate::ecs::components::{MeshRendererComponent, TransformComponent};
use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::{RenderStats, Renderer};
use crate::scene::Scene;

use super::camera::EditorCamera;
use super::gizmo::{GizmoOutcome, GizmoOverlay, GizmoPipeline};
use super::input::{MouseButton, ScreenRect, ViewportInput};

/// RGBA of stand-in cubes for entities without a drawable model
pub const PLACEHOLDER_CUBE_COLOR: [f32; 4] = [1.0, 0.5, 0.2, 1.0];

/// Viewport background RGBA
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.4, 1.0];

fn placeholder_color() -> Vec4 {
    Vec4::from(PLACEHOLDER_CUBE_COLOR)
}

/// What happened during one viewport frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportFrame {
    /// Editor camera consumed input this frame
    pub camera_updated: bool,
    /// Gizmo pipeline result
    pub gizmo: GizmoOutcome,
    /// Whether the scene was rendered
    pub rendered: bool,
    /// Renderer counters after the frame
    pub stats: RenderStats,
}

/// Scene viewport with its editor camera and gizmo
#[derive(Debug, Clone)]
pub struct ViewportPanel {
    camera: EditorCamera,
    gizmo: GizmoPipeline,
    size: (u32, u32),
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl ViewportPanel {
    /// Create a panel sized and tuned from the editor configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            camera: EditorCamera::from_config(&config.camera),
            gizmo: GizmoPipeline::from_config(&config.gizmo),
            size: (config.camera.viewport_width as u32, config.camera.viewport_height as u32),
        }
    }

    /// Editor camera
    pub fn camera(&self) -> &EditorCamera {
        &self.camera
    }

    /// Mutable editor camera
    pub fn camera_mut(&mut self) -> &mut EditorCamera {
        &mut self.camera
    }

    /// Gizmo state
    pub fn gizmo(&self) -> &GizmoPipeline {
        &self.gizmo
    }

    /// Mutable gizmo state
    pub fn gizmo_mut(&mut self) -> &mut GizmoPipeline {
        &mut self.gizmo
    }

    /// Current target size in pixels
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Run one viewport frame
    pub fn on_update(
        &mut self,
        delta_time: f32,
        input: &ViewportInput,
        scene: &mut Scene,
        selection: Option<Entity>,
        renderer: &mut dyn Renderer,
        overlay: &mut dyn GizmoOverlay,
    ) -> ViewportFrame {
        self.resize(input.panel_rect, renderer);

        // W and E double as fly keys while orbiting
        if !input.camera.is_mouse_button_down(MouseButton::Right) {
            for &key in &input.key_presses {
                self.gizmo.handle_key(key);
            }
        }

        let camera_updated =
            (input.focused || input.hovered) && !overlay.is_using() && !overlay.is_over();
        if camera_updated {
            self.camera.update(delta_time, &input.camera);
        }

        let gizmo = self
            .gizmo
            .evaluate(scene, selection, &self.camera, input.panel_rect, overlay);

        let rendered = self.size.0 > 0 && self.size.1 > 0 && self.render_scene(scene, renderer);

        ViewportFrame {
            camera_updated,
            gizmo,
            rendered,
            stats: renderer.stats(),
        }
    }

    fn resize(&mut self, rect: ScreenRect, renderer: &mut dyn Renderer) {
        if !rect.has_area() {
            return;
        }
        let size = (rect.width as u32, rect.height as u32);
        if size == self.size || size.0 == 0 || size.1 == 0 {
            return;
        }

        match renderer.resize_target(size.0, size.1) {
            Ok(()) => {
                self.size = size;
                self.camera.set_viewport_size(rect.width, rect.height);
            }
            Err(e) => log::error!("Failed to resize viewport to {}x{}: {}", size.0, size.1, e),
        }
    }

    fn render_scene(&self, scene: &Scene, renderer: &mut dyn Renderer) -> bool {
        if let Err(e) = renderer.bind_target() {
            log::error!("Failed to bind viewport target: {}", e);
            return false;
        }

        renderer.set_clear_color(Vec4::from(CLEAR_COLOR));
        renderer.clear();
        renderer.begin_scene(self.camera.view_matrix(), self.camera.projection(), &self.camera.position());
        renderer.draw_grid();

        let store = scene.store();
        for (entity, transform) in store.iter_components::<TransformComponent>() {
            let matrix = transform.transform();
            match store.get_component::<MeshRendererComponent>(entity) {
                Some(mesh) if !mesh.visible => {}
                Some(mesh) => draw_mesh(renderer, mesh, &matrix),
                None => renderer.draw_cube(&matrix, placeholder_color()),
            }
        }

        renderer.end_scene();
        renderer.unbind_target();
        true
    }
}

/// Y extent of the cube standing in for a built-in plane
const PLANE_THICKNESS: f32 = 0.01;

/// Built-in primitives go through the renderer's cube; a plane is a flattened
/// cube and a sphere has no primitive yet, so it keeps the unit cube.
fn draw_builtin(renderer: &mut dyn Renderer, builtin: BuiltinMesh, matrix: &Mat4) {
    match builtin {
        BuiltinMesh::Cube => renderer.draw_cube(matrix, placeholder_color()),
        BuiltinMesh::Plane => {
            let flattened = matrix * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, PLANE_THICKNESS, 1.0));
            renderer.draw_cube(&flattened, placeholder_color());
        }
        BuiltinMesh::Sphere => {
            log::trace!("No sphere primitive, drawing '{}' as a cube", builtin.path());
            renderer.draw_cube(matrix, placeholder_color());
        }
    }
}

fn draw_mesh(renderer: &mut dyn Renderer, mesh: &MeshRendererComponent, matrix: &Mat4) {
    if let Some(builtin) = BuiltinMesh::from_path(&mesh.model_path) {
        draw_builtin(renderer, builtin, matrix);
        return;
    }

    match ModelFormat::detect(&mesh.model_path) {
        ModelFormat::Unknown => {
            log::trace!("No importer for '{}', drawing placeholder", mesh.model_path);
            renderer.draw_cube(matrix, placeholder_color());
        }
        format => {
            if let Err(e) = renderer.draw_model(&mesh.model_path, format, matrix) {
                log::warn!("{}; drawing placeholder", e);
                renderer.draw_cube(matrix, placeholder_color());
            }
        }
    }
}
