//! Job storage implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use deckforge_core::{DomainError, Job, JobId, JobPatch, NewJob};

use crate::error::StoreError;
use crate::persistence::LoadOutcome;
use crate::persistence::collection::FileCollection;

/// Job store abstraction.
pub trait JobStore: Send + Sync {
    /// Create a job. The id is generated when `job.job_id` is `None`.
    fn create_job(&self, job: NewJob) -> Result<Job, StoreError>;

    /// Merge `patch` into the job. `Ok(None)` if the id is unknown.
    fn update_job(&self, job_id: &JobId, patch: &JobPatch) -> Result<Option<Job>, StoreError>;

    /// Get a job by ID.
    fn get_job(&self, job_id: &JobId) -> Result<Option<Job>, StoreError>;

    /// All jobs, newest first.
    fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    /// Number of stored jobs.
    fn len(&self) -> Result<usize, StoreError>;
}

impl<S> JobStore for Arc<S>
where
    S: JobStore + ?Sized,
{
    fn create_job(&self, job: NewJob) -> Result<Job, StoreError> {
        (**self).create_job(job)
    }

    fn update_job(&self, job_id: &JobId, patch: &JobPatch) -> Result<Option<Job>, StoreError> {
        (**self).update_job(job_id, patch)
    }

    fn get_job(&self, job_id: &JobId) -> Result<Option<Job>, StoreError> {
        (**self).get_job(job_id)
    }

    fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        (**self).list_jobs()
    }

    fn len(&self) -> Result<usize, StoreError> {
        (**self).len()
    }
}

/// Job store backed by a JSON document on disk.
#[derive(Debug)]
pub struct FileJobStore {
    jobs: FileCollection<Job>,
}

impl FileJobStore {
    /// Load jobs from `path` (empty if the file is missing or corrupt).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let jobs = FileCollection::open(path);
        info!(
            path = %jobs.path().display(),
            outcome = ?jobs.load_outcome(),
            count = jobs.len().unwrap_or_default(),
            "job store opened"
        );
        Self { jobs }
    }

    pub fn path(&self) -> &Path {
        self.jobs.path()
    }

    /// What happened when the backing file was loaded at startup.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.jobs.load_outcome()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(JobStore::len(self)? == 0)
    }
}

impl JobStore for FileJobStore {
    fn create_job(&self, job: NewJob) -> Result<Job, StoreError> {
        if job.job_id.as_ref().is_some_and(JobId::is_blank) {
            return Err(DomainError::invalid_id("jobId must not be empty").into());
        }

        let job = self.jobs.insert_front(job.into_job(Utc::now()))?;
        info!(job_id = %job.job_id, status = %job.status, "job created");
        Ok(job)
    }

    fn update_job(&self, job_id: &JobId, patch: &JobPatch) -> Result<Option<Job>, StoreError> {
        let now = Utc::now();
        let mut skipped = Vec::new();
        let updated = self
            .jobs
            .modify(job_id, |job| skipped = patch.apply_to(job, now))?;

        match &updated {
            Some(job) => {
                if !skipped.is_empty() {
                    warn!(job_id = %job_id, keys = ?skipped, "patch tried to overwrite reserved job fields; ignored");
                }
                debug!(job_id = %job_id, status = %job.status, "job updated");
            }
            None => debug!(job_id = %job_id, "update for unknown job"),
        }
        Ok(updated)
    }

    fn get_job(&self, job_id: &JobId) -> Result<Option<Job>, StoreError> {
        self.jobs.get(job_id)
    }

    fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.jobs.list()
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckforge_core::JobStatus;
    use serde_json::json;

    fn job_id(s: &str) -> JobId {
        JobId::parse(s).unwrap()
    }

    fn store() -> (tempfile::TempDir, FileJobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileJobStore::open(dir.path().join("jobs.json"));
        (dir, store)
    }

    #[test]
    fn create_then_get() {
        let (_dir, store) = store();

        let created = store
            .create_job(NewJob::new().with_id(job_id("j1")).with_field("topic", "cells"))
            .unwrap();
        let fetched = store.get_job(&job_id("j1")).unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.status, JobStatus::Queued);
        assert_eq!(fetched.field("topic"), Some(&json!("cells")));
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn create_without_id_generates_one() {
        let (_dir, store) = store();

        let job = store.create_job(NewJob::new()).unwrap();

        assert!(!job.job_id.is_blank());
        assert!(store.get_job(&job.job_id).unwrap().is_some());
    }

    #[test]
    fn duplicate_job_id_is_rejected() {
        let (_dir, store) = store();
        store.create_job(NewJob::new().with_id(job_id("j1"))).unwrap();

        let err = store
            .create_job(NewJob::new().with_id(job_id("j1")).with_status(JobStatus::Failed))
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(
            store.get_job(&job_id("j1")).unwrap().unwrap().status,
            JobStatus::Queued
        );
    }

    #[test]
    fn update_unknown_returns_none_and_changes_nothing() {
        let (_dir, store) = store();
        store.create_job(NewJob::new().with_id(job_id("j1"))).unwrap();
        let before = store.list_jobs().unwrap();

        let result = store
            .update_job(&job_id("nope"), &JobPatch::new().status(JobStatus::Completed))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.list_jobs().unwrap(), before);
    }

    #[test]
    fn update_merges_and_bumps_updated_at() {
        let (_dir, store) = store();
        let created = store
            .create_job(NewJob::new().with_id(job_id("j1")).with_field("topic", "cells"))
            .unwrap();

        let updated = store
            .update_job(
                &job_id("j1"),
                &JobPatch::new().status(JobStatus::Completed).deck_id("d1"),
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.job_id, job_id("j1"));
        assert_eq!(updated.status, JobStatus::Completed);
        assert_eq!(updated.deck_id(), Some("d1"));
        assert_eq!(updated.field("topic"), Some(&json!("cells")));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.created_at);
        assert_eq!(store.get_job(&job_id("j1")).unwrap().unwrap(), updated);
    }

    #[test]
    fn failed_update_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        let store = FileJobStore::open(&path);
        let created = store.create_job(NewJob::new().with_id(job_id("j1"))).unwrap();
        let tmp = crate::persistence::json_file::temp_path(&path);
        std::fs::create_dir(&tmp).unwrap();

        let err = store
            .update_job(
                &job_id("j1"),
                &JobPatch::new().status(JobStatus::Completed).deck_id("d1"),
            )
            .unwrap_err();

        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(store.get_job(&job_id("j1")).unwrap(), Some(created));

        std::fs::remove_dir(&tmp).unwrap();
        store
            .update_job(&job_id("j1"), &JobPatch::new().status(JobStatus::Processing))
            .unwrap()
            .unwrap();
        let reopened = FileJobStore::open(&path);
        let job = reopened.get_job(&job_id("j1")).unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.deck_id(), None);
    }

    #[test]
    fn store_allows_any_transition_sequence() {
        let (_dir, store) = store();
        store
            .create_job(NewJob::new().with_id(job_id("j1")).with_status(JobStatus::Completed))
            .unwrap();

        let job = store
            .update_job(&job_id("j1"), &JobPatch::new().status(JobStatus::Queued))
            .unwrap()
            .unwrap();

        assert_eq!(job.status, JobStatus::Queued);
    }

    #[test]
    fn len_is_available_through_the_trait() {
        let (_dir, store) = store();
        store.create_job(NewJob::new().with_id(job_id("a"))).unwrap();
        store.create_job(NewJob::new().with_id(job_id("b"))).unwrap();

        let dynamic: &dyn JobStore = &store;

        assert_eq!(dynamic.len().unwrap(), 2);
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn works_through_arc() {
        let (_dir, store) = store();
        let shared: Arc<FileJobStore> = Arc::new(store);

        shared.create_job(NewJob::new().with_id(job_id("j1"))).unwrap();

        assert_eq!(shared.list_jobs().unwrap().len(), 1);
    }
}
