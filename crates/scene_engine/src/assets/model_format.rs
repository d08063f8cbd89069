//! Model file format detection

use std::path::Path;

/// Path prefix for meshes the renderer provides itself
pub const BUILTIN_SCHEME: &str = "builtin://";

/// Model file formats the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelFormat {
    /// Unrecognized extension
    #[default]
    Unknown,
    /// Autodesk FBX
    Fbx,
    /// Wavefront OBJ
    Obj,
    /// glTF JSON
    Gltf,
    /// glTF binary
    Glb,
}

impl ModelFormat {
    /// Detect the format from the file extension, case-insensitively
    pub fn detect(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("fbx") => Self::Fbx,
            Some("obj") => Self::Obj,
            Some("gltf") => Self::Gltf,
            Some("glb") => Self::Glb,
            _ => Self::Unknown,
        }
    }

    /// Whether the importer can load this format
    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Fbx => "FBX",
            Self::Obj => "OBJ",
            Self::Gltf => "glTF",
            Self::Glb => "GLB",
        }
    }
}

/// Primitive meshes addressed by `builtin://` paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMesh {
    /// Unit cube centred on the origin
    Cube,
    /// Unit quad in the XZ plane
    Plane,
    /// Unit-diameter UV sphere
    Sphere,
}

impl BuiltinMesh {
    /// Path stored in a mesh renderer
    pub fn path(self) -> &'static str {
        match self {
            Self::Cube => "builtin://cube",
            Self::Plane => "builtin://plane",
            Self::Sphere => "builtin://sphere",
        }
    }

    /// Parse a `builtin://` path
    pub fn from_path(path: &str) -> Option<Self> {
        match path.strip_prefix(BUILTIN_SCHEME)? {
            "cube" => Some(Self::Cube),
            "plane" => Some(Self::Plane),
            "sphere" => Some(Self::Sphere),
            _ => None,
        }
    }
}
