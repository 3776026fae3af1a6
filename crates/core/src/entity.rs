//! Entity trait: a record with a stable identity inside a collection.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier, backed by a string.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + AsRef<str>;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
