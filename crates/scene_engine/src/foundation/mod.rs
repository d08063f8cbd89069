//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the editor:
//! - Math types and the transform model
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
