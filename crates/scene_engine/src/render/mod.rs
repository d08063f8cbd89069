//! Rendering capability consumed by the editor viewport
//!
//! The editor core never talks to a graphics API. It drives a [`Renderer`]
//! implementation supplied by the host: bind an off-screen target, clear it,
//! draw the grid and each entity, and expose the color attachment for the
//! UI to display.
//!
//! [`HeadlessRenderer`] records the submitted work instead of drawing it and
//! backs the command-line editor and the tests.

mod headless;

pub use headless::{DrawCommand, HeadlessRenderer};

use thiserror::Error;

use crate::assets::ModelFormat;
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Target dimensions are unusable
    #[error("Invalid render target size {width}x{height}")]
    InvalidTargetSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A draw or bind was issued outside bind/unbind
    #[error("Render target is not bound")]
    TargetNotBound,

    /// Model could not be loaded or drawn
    #[error("Model error for '{path}': {reason}")]
    Model {
        /// Model path
        path: String,
        /// Failure description
        reason: String,
    },
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Per-frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Draw calls submitted
    pub draw_calls: u32,
    /// Vertices submitted
    pub vertices: u32,
    /// Triangles submitted
    pub triangles: u32,
}

impl RenderStats {
    /// Add one draw call
    pub fn record(&mut self, vertices: u32, triangles: u32) {
        self.draw_calls += 1;
        self.vertices += vertices;
        self.triangles += triangles;
    }
}

/// Off-screen scene renderer
pub trait Renderer {
    /// Bind the off-screen target for drawing
    fn bind_target(&mut self) -> RenderResult<()>;

    /// Unbind the off-screen target
    fn unbind_target(&mut self);

    /// Resize the off-screen target in pixels
    fn resize_target(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Color used by [`Renderer::clear`]
    fn set_clear_color(&mut self, color: Vec4);

    /// Clear the bound target
    fn clear(&mut self);

    /// Start a frame with the given camera
    fn begin_scene(&mut self, view: &Mat4, projection: &Mat4, camera_position: &Vec3);

    /// Finish the frame
    fn end_scene(&mut self);

    /// Draw the ground grid
    fn draw_grid(&mut self);

    /// Draw a unit cube
    fn draw_cube(&mut self, transform: &Mat4, color: Vec4);

    /// Draw a model file
    fn draw_model(&mut self, model_path: &str, format: ModelFormat, transform: &Mat4) -> RenderResult<()>;

    /// Opaque handle of the color attachment for display
    fn color_attachment(&self) -> u64;

    /// Counters for the current frame
    fn stats(&self) -> RenderStats;
}
