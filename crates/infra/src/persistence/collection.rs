//! In-memory newest-first collection, written through to one JSON file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use deckforge_core::Entity;

use super::json_file::{self, LoadOutcome};
use crate::error::StoreError;

/// Newest-first collection of records with unique ids.
///
/// Every mutation holds the write lock across mutate + persist, so
/// concurrent writers are serialized and the file always reflects the
/// latest committed state. A failed persist rolls the mutation back.
#[derive(Debug)]
pub(crate) struct FileCollection<T> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
    load_outcome: LoadOutcome,
}

impl<T> FileCollection<T>
where
    T: Entity + Clone + Serialize + DeserializeOwned,
{
    /// Load from `path`, falling back to an empty collection.
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (loaded, load_outcome) = json_file::load_with_outcome::<Vec<T>>(&path, Vec::new());
        let records = dedupe(loaded, &path);
        Self {
            path,
            records: RwLock::new(records),
            load_outcome,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Put `record` at the head and persist.
    pub(crate) fn insert_front(&self, record: T) -> Result<T, StoreError> {
        let mut records = self.write()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::AlreadyExists(record.id().to_string()));
        }

        records.insert(0, record.clone());
        if let Err(err) = json_file::save(&self.path, &*records) {
            records.remove(0);
            return Err(err.into());
        }
        Ok(record)
    }

    /// Apply `mutate` to the record with `id` in place and persist.
    ///
    /// Returns `Ok(None)` without touching disk when the id is unknown.
    pub(crate) fn modify<F>(&self, id: &T::Id, mutate: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.write()?;
        let Some(index) = records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };

        let previous = records[index].clone();
        mutate(&mut records[index]);
        if let Err(err) = json_file::save(&self.path, &*records) {
            records[index] = previous;
            return Err(err.into());
        }
        Ok(Some(records[index].clone()))
    }

    pub(crate) fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// Snapshot in newest-first order.
    pub(crate) fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.read()?.clone())
    }

    pub(crate) fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, StoreError> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, StoreError> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }
}

/// Drop blank and repeated ids from a loaded file, keeping the first
/// (newest) entry for each id.
fn dedupe<T: Entity>(records: Vec<T>, path: &Path) -> Vec<T> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let mut blank = 0usize;
    let kept: Vec<T> = records
        .into_iter()
        .filter(|r| {
            if r.id().as_ref().trim().is_empty() {
                blank += 1;
                return false;
            }
            seen.insert(r.id().clone())
        })
        .collect();

    if blank > 0 {
        warn!(
            path = %path.display(),
            dropped = blank,
            "records with blank ids in persisted state; dropped"
        );
    }
    let duplicates = before - blank - kept.len();
    if duplicates > 0 {
        warn!(
            path = %path.display(),
            dropped = duplicates,
            "duplicate ids in persisted state; kept newest entries"
        );
    }
    kept
}
