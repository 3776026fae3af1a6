//! On-demand snapshot of the persisted documents.
//!
//! The stores never call this. It relies on saves being atomic renames, so a
//! copy taken at any moment is a complete document (possibly one write old).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::StoreConfig;

const BACKUP_PREFIX: &str = "backup-";

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("no persisted files found under {}", .0.display())]
    NothingToBackup(PathBuf),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BackupError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Copy the current jobs/decks documents into a new timestamped directory
/// under `config.backup_dir` and return its path.
pub fn create_backup(config: &StoreConfig) -> Result<PathBuf, BackupError> {
    create_backup_at(config, Utc::now())
}

/// [`create_backup`] with an explicit timestamp for the directory name.
pub fn create_backup_at(config: &StoreConfig, at: DateTime<Utc>) -> Result<PathBuf, BackupError> {
    let sources: Vec<PathBuf> = config
        .persisted_files()
        .into_iter()
        .filter(|path| {
            let present = path.is_file();
            if !present {
                warn!(path = %path.display(), "persisted file missing; skipped from backup");
            }
            present
        })
        .collect();

    if sources.is_empty() {
        return Err(BackupError::NothingToBackup(config.data_dir.clone()));
    }

    fs::create_dir_all(&config.backup_dir).map_err(|e| BackupError::io(&config.backup_dir, e))?;
    let target = claim_backup_dir(&config.backup_dir, at)?;

    for source in &sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let dest = target.join(name);
        if let Err(err) = fs::copy(source, &dest) {
            let _ = fs::remove_dir_all(&target);
            return Err(BackupError::io(source, err));
        }
    }

    info!(path = %target.display(), files = sources.len(), "backup created");
    Ok(target)
}

/// Create `backup-<stamp>` (or `backup-<stamp>-N` on collision) and return it.
///
/// `create_dir` fails on an existing directory, which makes the claim
/// race-free between concurrent invocations.
fn claim_backup_dir(root: &Path, at: DateTime<Utc>) -> Result<PathBuf, BackupError> {
    let stamp = at.format("%Y%m%dT%H%M%S%.3fZ").to_string();
    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("{BACKUP_PREFIX}{stamp}"),
            n => format!("{BACKUP_PREFIX}{stamp}-{n}"),
        };
        let candidate = root.join(name);
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(err) => return Err(BackupError::io(&candidate, err)),
        }
    }
}
