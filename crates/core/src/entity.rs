//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, Utc};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// When the record was first persisted.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Sort entities newest-first.
///
/// Ties on `created_at` fall back to the identifier, which is time-ordered
/// (UUIDv7) for every entity in this workspace.
pub fn sort_newest_first<E: Entity>(items: &mut [E]) {
    items.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(a.id()))
    });
}
