//! Asset references
//!
//! Model import lives outside the editor core. This module only classifies
//! model paths so the renderer is handed a known format, and names the
//! built-in primitive meshes.

pub mod model_format;

pub use model_format::{BuiltinMesh, ModelFormat, BUILTIN_SCHEME};
