//! `deckforge-backup`: snapshot the persisted jobs/decks documents.
//!
//! Prints the backup directory and exits 0, or logs the failure and exits 1.
//! Locations come from `DECKFORGE_DATA_DIR` / `DECKFORGE_BACKUP_DIR`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use deckforge_infra::{StoreConfig, create_backup};

fn main() -> ExitCode {
    deckforge_observability::init_for_cli();

    match run() {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "backup failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<PathBuf> {
    let config = StoreConfig::from_env();
    create_backup(&config).with_context(|| {
        format!(
            "failed to back up {} into {}",
            config.data_dir.display(),
            config.backup_dir.display()
        )
    })
}
