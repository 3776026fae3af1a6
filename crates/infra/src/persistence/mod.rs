//! Durable file persistence.
//!
//! `json_file` is a stateless codec/IO facility: whole-collection load with
//! fallback, and atomic whole-file save. `collection` layers the in-memory,
//! lock-guarded record list the stores are built on.

pub(crate) mod collection;
pub mod json_file;

pub use json_file::{LoadOutcome, PersistenceError, load, load_with_outcome, save};
