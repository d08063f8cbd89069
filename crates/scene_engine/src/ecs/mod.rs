//! Entity-Component-System implementation
//!
//! Entities are generational handles into a [`ComponentStore`]; components are
//! plain data records kept in dense per-type arrays and queried by type.

pub mod entity;
pub mod component;
pub mod storage;
pub mod world;
pub mod query;
pub mod components;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityId};
pub use component::Component;
pub use world::ComponentStore;
pub use query::{ComponentSet, View};
