//! Job store: lifecycle records for generation jobs.
//!
//! ## Design
//!
//! - Jobs are kept newest-first in memory and written through to one JSON file
//! - `jobId` is unique; creating a duplicate is rejected
//! - Updates are shallow merges (`JobPatch`) and always bump `updatedAt`
//! - The store does not police status transitions; the worker does

pub mod store;

pub use store::{FileJobStore, JobStore};
