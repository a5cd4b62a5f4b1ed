//! Entity trait: identity + soft-delete aware lifecycle.

use crate::value_object::Timestamps;

/// Persisted record with a store-assigned identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    fn timestamps(&self) -> &Timestamps;

    /// Soft-deleted records stay in storage but are hidden from reads.
    fn is_deleted(&self) -> bool {
        self.timestamps().deleted_at.is_some()
    }
}
