//! Entity handles and persistent identities

use std::fmt;

slotmap::new_key_type! {
    /// Dense-storage handle for a live entity
    ///
    /// Generational: destroying the entity invalidates every copy of the
    /// handle, and a recycled slot never compares equal to a stale one. Only
    /// valid for the entity's lifetime; never persisted as its identity.
    pub struct Entity;
}

impl Entity {
    /// Raw handle value, written to scene documents for compatibility only
    pub fn raw(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }
}

/// Persistent 64-bit entity identity
///
/// Assigned once at creation and stable across save/load. Drawn from a uniform
/// random source; collisions are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Raw 64-bit value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
