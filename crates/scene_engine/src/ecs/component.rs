//! Component trait

/// Marker trait for component data stored in a [`ComponentStore`](super::ComponentStore)
pub trait Component: 'static + Send + Sync {}
