//! Scene management
//!
//! A [`Scene`] owns the component store, a display name and the identity
//! source for new entities. Entities are created and destroyed only through
//! the scene, which guarantees every live entity carries an identity, a tag
//! and a transform.
//!
//! ## Architecture
//!
//! ```text
//! Scene ──owns──> ComponentStore (dense per-type storage)
//!   │
//!   ├──> IdentitySource (seeded RNG, 64-bit entity identities)
//!   │
//!   └──> SceneSerializer (RON scene documents)
//! ```

mod identity;
mod scene;
mod serializer;

pub use identity::IdentitySource;
pub use scene::{populate_default_scene, EntityMut, EntityRef, Scene};
pub use serializer::{IdentityPolicy, SceneSerializer, SerializerError};
