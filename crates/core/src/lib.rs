//! `deckforge-core`: domain records for generation jobs and the decks they produce.
//!
//! This crate contains **pure domain** types (no I/O). Persistence lives in
//! `deckforge-infra`.

pub mod deck;
pub mod entity;
pub mod error;
pub mod id;
pub mod job;

pub use deck::{Card, Choice, Deck, Mcq};
pub use entity::Entity;
pub use error::DomainError;
pub use id::{DeckId, JobId};
pub use job::{Job, JobPatch, JobStatus, NewJob};
