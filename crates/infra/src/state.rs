//! Process-wide store handles.

use std::sync::Arc;

use tracing::warn;

use crate::config::StoreConfig;
use crate::decks::FileDeckStore;
use crate::jobs::FileJobStore;

/// The job and deck stores, opened once at startup and shared by handle.
///
/// Cloning is cheap; every clone refers to the same collections. Do not open
/// two `Stores` against the same data directory: there is no cross-process
/// locking.
#[derive(Debug, Clone)]
pub struct Stores {
    pub jobs: Arc<FileJobStore>,
    pub decks: Arc<FileDeckStore>,
}

impl Stores {
    pub fn open(config: &StoreConfig) -> Self {
        let jobs = Arc::new(FileJobStore::open(config.jobs_path()));
        let decks = Arc::new(FileDeckStore::open(config.decks_path()));

        if jobs.load_outcome().is_recovered() || decks.load_outcome().is_recovered() {
            warn!(
                data_dir = %config.data_dir.display(),
                jobs = ?jobs.load_outcome(),
                decks = ?decks.load_outcome(),
                "prior state discarded during startup; check backups"
            );
        }

        Self { jobs, decks }
    }
}
