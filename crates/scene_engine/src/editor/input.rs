//! Input snapshots consumed by the editor
//!
//! The windowing/UI layer owns the real input state. Once per frame it fills
//! a [`ViewportInput`] and hands it to the viewport; the editor never polls
//! devices itself.

use std::collections::HashSet;

use crate::foundation::math::Vec2;

/// Key codes the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// W key
    W,
    /// Escape key
    Escape,
    /// Left control
    LeftControl,
    /// Left shift
    LeftShift,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button (orbit)
    Right,
    /// Middle mouse button (pan)
    Middle,
}

/// Screen-space rectangle in pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl ScreenRect {
    /// Create a rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the rectangle has a drawable area
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Per-frame device state used by the editor camera
#[derive(Debug, Clone)]
pub struct CameraInput {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    /// Absolute pointer position in pixels
    pub mouse_position: Vec2,
    /// Scroll wheel delta this frame, positive zooms in
    pub wheel_delta: f32,
}

impl Default for CameraInput {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            mouse_position: Vec2::zeros(),
            wheel_delta: 0.0,
        }
    }
}

impl CameraInput {
    /// Empty snapshot: nothing held, pointer at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key state
    pub fn set_key(&mut self, key: KeyCode, down: bool) {
        if down {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Record a mouse button state
    pub fn set_mouse_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Whether a key is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether a mouse button is held
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Builder pattern: hold a key
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.set_key(key, true);
        self
    }

    /// Builder pattern: hold a mouse button
    pub fn with_mouse_button(mut self, button: MouseButton) -> Self {
        self.set_mouse_button(button, true);
        self
    }

    /// Builder pattern: set the pointer position
    pub fn with_mouse_position(mut self, x: f32, y: f32) -> Self {
        self.mouse_position = Vec2::new(x, y);
        self
    }

    /// Builder pattern: set the wheel delta
    pub fn with_wheel(mut self, delta: f32) -> Self {
        self.wheel_delta = delta;
        self
    }
}

/// Per-frame viewport panel state from the UI layer
#[derive(Debug, Clone, Default)]
pub struct ViewportInput {
    /// Device state for camera navigation
    pub camera: CameraInput,
    /// Panel has keyboard focus
    pub focused: bool,
    /// Pointer is over the panel
    pub hovered: bool,
    /// Drawable area of the panel in screen space
    pub panel_rect: ScreenRect,
    /// Keys pressed (edge, not held) this frame
    pub key_presses: Vec<KeyCode>,
}

impl ViewportInput {
    /// Focused and hovered panel covering `panel_rect`
    pub fn active(panel_rect: ScreenRect, camera: CameraInput) -> Self {
        Self {
            camera,
            focused: true,
            hovered: true,
            panel_rect,
            key_presses: Vec::new(),
        }
    }

    /// Builder pattern: record a key press edge
    pub fn with_key_press(mut self, key: KeyCode) -> Self {
        self.key_presses.push(key);
        self
    }
}
