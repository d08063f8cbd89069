//! Entity identity generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::EntityId;

/// Source of uniformly random 64-bit entity identities
///
/// Owned by a scene, so tests can seed it and no process-wide state exists.
pub struct IdentitySource {
    rng: StdRng,
}

impl IdentitySource {
    /// Seed from operating-system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Draw the next identity
    pub fn next_id(&mut self) -> EntityId {
        EntityId(self.rng.gen())
    }
}

impl Default for IdentitySource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for IdentitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySource").finish_non_exhaustive()
    }
}
