//! Renderer that records work instead of drawing it

use crate::assets::ModelFormat;
use crate::foundation::math::{Mat4, Vec3, Vec4};

use super::{RenderError, RenderResult, RenderStats, Renderer};

const CUBE_VERTICES: u32 = 24;
const CUBE_TRIANGLES: u32 = 12;
const GRID_VERTICES: u32 = 4;
const GRID_TRIANGLES: u32 = 2;

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Target bound
    Bind,
    /// Target cleared
    Clear(Vec4),
    /// Frame started
    BeginScene {
        /// Camera position
        camera_position: Vec3,
    },
    /// Grid drawn
    Grid,
    /// Cube drawn
    Cube {
        /// Model matrix
        transform: Mat4,
        /// RGBA color
        color: Vec4,
    },
    /// Model drawn
    Model {
        /// Model path
        path: String,
        /// Detected format
        format: ModelFormat,
        /// Model matrix
        transform: Mat4,
    },
    /// Frame finished
    EndScene,
    /// Target unbound
    Unbind,
}

/// Renderer that records commands and counts work
#[derive(Debug)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    clear_color: Vec4,
    bound: bool,
    commands: Vec<DrawCommand>,
    stats: RenderStats,
    frames: u64,
}

impl HeadlessRenderer {
    /// Create a renderer with a `width` x `height` target
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear_color: Vec4::new(0.2, 0.3, 0.4, 1.0),
            bound: false,
            commands: Vec::new(),
            stats: RenderStats::default(),
            frames: 0,
        }
    }

    /// Target size in pixels
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Commands recorded since the last [`Renderer::begin_scene`]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Completed frames
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn push(&mut self, command: DrawCommand) {
        if !self.bound {
            log::warn!("Headless renderer received {:?} with no target bound", command);
        }
        self.commands.push(command);
    }
}

impl Renderer for HeadlessRenderer {
    fn bind_target(&mut self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidTargetSize {
                width: self.width,
                height: self.height,
            });
        }
        self.commands.clear();
        self.stats = RenderStats::default();
        self.bound = true;
        self.commands.push(DrawCommand::Bind);
        Ok(())
    }

    fn unbind_target(&mut self) {
        self.push(DrawCommand::Unbind);
        self.bound = false;
    }

    fn resize_target(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidTargetSize { width, height });
        }
        log::debug!("Resizing headless target {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.push(DrawCommand::Clear(self.clear_color));
    }

    fn begin_scene(&mut self, _view: &Mat4, _projection: &Mat4, camera_position: &Vec3) {
        self.push(DrawCommand::BeginScene {
            camera_position: *camera_position,
        });
    }

    fn end_scene(&mut self) {
        self.push(DrawCommand::EndScene);
        self.frames += 1;
    }

    fn draw_grid(&mut self) {
        self.stats.record(GRID_VERTICES, GRID_TRIANGLES);
        self.push(DrawCommand::Grid);
    }

    fn draw_cube(&mut self, transform: &Mat4, color: Vec4) {
        self.stats.record(CUBE_VERTICES, CUBE_TRIANGLES);
        self.push(DrawCommand::Cube {
            transform: *transform,
            color,
        });
    }

    fn draw_model(&mut self, model_path: &str, format: ModelFormat, transform: &Mat4) -> RenderResult<()> {
        if !self.bound {
            return Err(RenderError::TargetNotBound);
        }
        if !format.is_supported() {
            return Err(RenderError::Model {
                path: model_path.to_string(),
                reason: "unsupported format".to_string(),
            });
        }
        // Headless has no importer; count the model as a single cube-sized draw.
        self.stats.record(CUBE_VERTICES, CUBE_TRIANGLES);
        self.push(DrawCommand::Model {
            path: model_path.to_string(),
            format,
            transform: *transform,
        });
        Ok(())
    }

    fn color_attachment(&self) -> u64 {
        1
    }

    fn stats(&self) -> RenderStats {
        self.stats
    }
}
