//! Identity and naming components

use crate::ecs::{Component, EntityId};

/// Persistent identity, assigned at creation and never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdComponent {
    id: EntityId,
}

impl IdComponent {
    pub(crate) fn new(id: EntityId) -> Self {
        Self { id }
    }

    /// Stable 64-bit identity
    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Component for IdComponent {}

/// Human-readable entity name; not required to be unique
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagComponent {
    /// Display name
    pub tag: String,
}

impl TagComponent {
    /// Create a tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Component for TagComponent {}
