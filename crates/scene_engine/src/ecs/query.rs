//! Multi-component views
//!
//! A [`View`] walks the dense entity list of its first component type and
//! keeps the entities that also own every other type in the set. Views borrow
//! the store, so components cannot be added or removed while one is alive;
//! collect the entities first when mutating.

use std::marker::PhantomData;

use super::{Component, ComponentStore, Entity};

/// A tuple of one to four component types a view filters on
pub trait ComponentSet: 'static {
    /// Candidate entities, taken from the first type's storage
    fn candidates(store: &ComponentStore) -> &[Entity];

    /// Whether the entity owns every type in the set
    fn matches(store: &ComponentStore, entity: Entity) -> bool;
}

macro_rules! impl_component_set {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Component $(, $rest: Component)*> ComponentSet for ($first, $($rest,)*) {
            fn candidates(store: &ComponentStore) -> &[Entity] {
                store.entities_with::<$first>()
            }

            fn matches(store: &ComponentStore, entity: Entity) -> bool {
                store.has_component::<$first>(entity) $(&& store.has_component::<$rest>(entity))*
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);

/// Lazy view over entities holding every component in `S`
///
/// Restartable: [`View::iter`] can be called any number of times, and the
/// view is `Copy`.
pub struct View<'s, S: ComponentSet> {
    store: &'s ComponentStore,
    _marker: PhantomData<fn() -> S>,
}

impl<S: ComponentSet> Clone for View<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ComponentSet> Copy for View<'_, S> {}

impl<'s, S: ComponentSet> View<'s, S> {
    pub(super) fn new(store: &'s ComponentStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Iterate matching entities
    pub fn iter(&self) -> impl Iterator<Item = Entity> + 's {
        let store = self.store;
        S::candidates(store)
            .iter()
            .copied()
            .filter(move |&entity| S::matches(store, entity))
    }

    /// Number of matching entities
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Whether no entity matches
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'s, S: ComponentSet> IntoIterator for View<'s, S> {
    type Item = Entity;
    type IntoIter = Box<dyn Iterator<Item = Entity> + 's>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
