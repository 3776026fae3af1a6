//! Load/save of a whole collection as one pretty-printed JSON document.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// How a collection came back from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed and decoded cleanly.
    Loaded,
    /// No file yet; first start.
    Missing,
    /// The file exists but could not be read (permissions, is a directory, ...).
    Unreadable,
    /// The file was read but is not a valid document.
    Corrupt,
}

impl LoadOutcome {
    /// True when prior state existed but was discarded in favor of the fallback.
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Unreadable | LoadOutcome::Corrupt)
    }
}

/// Persistence error. Only writes fail; loads always fall back.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode collection for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read the document at `path`, or return `fallback` if it is missing,
/// unreadable or malformed.
pub fn load<T: DeserializeOwned>(path: &Path, fallback: T) -> T {
    load_with_outcome(path, fallback).0
}

/// Like [`load`], also reporting which branch was taken.
///
/// Discarded state is logged at `warn`: a damaged file must not keep the
/// process from starting, but the loss has to be visible.
pub fn load_with_outcome<T: DeserializeOwned>(path: &Path, fallback: T) -> (T, LoadOutcome) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted state; starting empty");
            return (fallback, LoadOutcome::Missing);
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "persisted state unreadable; starting empty"
            );
            return (fallback, LoadOutcome::Unreadable);
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => (value, LoadOutcome::Loaded),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                bytes = bytes.len(),
                "persisted state is corrupt; starting empty"
            );
            (fallback, LoadOutcome::Corrupt)
        }
    }
}

/// Replace the document at `path` with `value`.
///
/// Creates the parent directory, writes a sibling temp file, syncs it,
/// renames it over the target and syncs the directory. Readers see either
/// the old or the new document in full.
pub fn save<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|source| PersistenceError::io(parent, source))?;

    let mut encoded = serde_json::to_vec_pretty(value).map_err(|source| PersistenceError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    encoded.push(b'\n');

    let tmp = temp_path(path);
    if let Err(source) = write_synced(&tmp, &encoded) {
        let _ = fs::remove_file(&tmp);
        return Err(PersistenceError::io(&tmp, source));
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(PersistenceError::io(path, source));
    }
    sync_dir(parent).map_err(|source| PersistenceError::io(parent, source))?;

    debug!(path = %path.display(), bytes = encoded.len(), "collection persisted");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Flush the directory entry so the rename itself survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// `jobs.json` -> `jobs.json.tmp`, in the same directory so the rename stays
/// on one filesystem.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
