//! Infrastructure layer: durable JSON-file persistence, the job and deck
//! stores built on it, configuration, and the backup operation.

pub mod backup;
pub mod config;
pub mod decks;
pub mod error;
pub mod jobs;
pub mod persistence;
pub mod state;


pub use backup::{BackupError, create_backup};
pub use config::StoreConfig;
pub use decks::{DeckStore, FileDeckStore};
pub use error::StoreError;
pub use jobs::{FileJobStore, JobStore};
pub use persistence::{LoadOutcome, PersistenceError};
pub use state::Stores;
