//! Deck store: immutable, fully materialized decks.

pub mod store;

pub use store::{DeckStore, FileDeckStore};
