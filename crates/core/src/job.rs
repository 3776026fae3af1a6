//! Generation job records and the patch mechanism that advances them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::Entity;
use crate::id::JobId;

/// Keys owned by the record itself; a patch never writes them through its
/// open field map.
pub const RESERVED_KEYS: [&str; 4] = ["jobId", "status", "createdAt", "updatedAt"];

/// Job lifecycle status.
///
/// The logical flow is `queued → processing → {completed, failed}`. Stores do
/// not enforce it; the worker driving the job owns transition legality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted, waiting for a worker
    #[default]
    Queued,
    /// A worker is generating the deck
    Processing,
    /// Finished; a deck id is usually attached
    Completed,
    /// Finished with an error
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

impl core::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked generation job.
///
/// Besides the fixed fields, a job carries an open map of payload/result
/// fields (`deckId`, `error`, `progress`, ...) that patches merge into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: JobId,
    #[serde(default)]
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Job {
    /// A queued job with no payload fields.
    pub fn new(job_id: JobId, now: DateTime<Utc>) -> Self {
        Self {
            job_id,
            status: JobStatus::Queued,
            created_at: now,
            updated_at: now,
            fields: Map::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Id of the deck produced by this job, once attached.
    pub fn deck_id(&self) -> Option<&str> {
        self.field("deckId").and_then(Value::as_str)
    }

    /// Failure message recorded by the worker.
    pub fn error(&self) -> Option<&str> {
        self.field("error").and_then(Value::as_str)
    }
}

impl Entity for Job {
    type Id = JobId;

    fn id(&self) -> &JobId {
        &self.job_id
    }
}

/// Input for creating a job.
///
/// The id is optional: when omitted the store generates one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewJob {
    pub job_id: Option<JobId>,
    pub status: JobStatus,
    pub fields: Map<String, Value>,
}

impl NewJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, job_id: JobId) -> Self {
        self.job_id = Some(job_id);
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Materialize the record. Reserved keys in `fields` are dropped.
    pub fn into_job(self, now: DateTime<Utc>) -> Job {
        let mut fields = self.fields;
        fields.retain(|key, _| !is_reserved(key));
        Job {
            job_id: self.job_id.unwrap_or_else(JobId::generate),
            status: self.status,
            created_at: now,
            updated_at: now,
            fields,
        }
    }
}

/// Partial update merged into an existing [`Job`].
///
/// Shallow overwrite: every field present in the patch replaces the job's
/// value, every field absent is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn deck_id(self, deck_id: impl Into<String>) -> Self {
        self.set("deckId", deck_id.into())
    }

    pub fn error(self, message: impl Into<String>) -> Self {
        self.set("error", message.into())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.fields.is_empty()
    }

    /// Merge into `job` and bump `updated_at`.
    ///
    /// Returns the reserved keys that were present in the field map and
    /// skipped, so callers can report them.
    pub fn apply_to(&self, job: &mut Job, now: DateTime<Utc>) -> Vec<String> {
        let mut skipped = Vec::new();
        if let Some(status) = self.status {
            job.status = status;
        }
        for (key, value) in &self.fields {
            if is_reserved(key) {
                skipped.push(key.clone());
                continue;
            }
            job.fields.insert(key.clone(), value.clone());
        }
        job.updated_at = next_timestamp(job.updated_at, now);
        skipped
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Timestamp strictly after `previous`, preferring `now` when the clock has
/// advanced.
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
