//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Only identity validation fails here. Duplicates and I/O are store
/// concerns and live in `deckforge-infra`; a missing record is `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (empty, whitespace).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
