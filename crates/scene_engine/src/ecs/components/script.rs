//! Script binding component

use crate::ecs::Component;

/// Names a script attached to the entity
///
/// Scripts are not executed yet; the scene update only visits these.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptComponent {
    /// Script identifier
    pub script_name: String,
}

impl ScriptComponent {
    /// Create a script binding
    pub fn new(script_name: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
        }
    }
}

impl Component for ScriptComponent {}
