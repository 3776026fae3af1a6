//! Store error model.

use deckforge_core::DomainError;

use crate::persistence::PersistenceError;

/// Error returned by job and deck store operations.
///
/// Unknown ids are not errors: lookups and updates return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input record was rejected before touching the collection.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A record with this id is already stored.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// The collection could not be written; the mutation was rolled back.
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("store lock poisoned")]
    LockPoisoned,
}
