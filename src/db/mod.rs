pub mod connection;
pub mod job_repository;
pub mod memory;
pub mod migrations;

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::job::{Job, JobFilter};

pub use job_repository::JobRepository;
pub use memory::MemoryJobStore;

/// Persistence seam for jobs.
///
/// Implementations must return `list` results ordered by `created_at`
/// descending and apply the same predicates as [`JobFilter::matches`].
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new job and return the stored record
    async fn insert(&self, job: &Job) -> anyhow::Result<Job>;

    async fn list(&self, filter: &JobFilter) -> anyhow::Result<Vec<Job>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Job>>;

    /// Overwrite every mutable column of an existing job.
    /// Returns `None` when no row has the job's id.
    async fn update(&self, job: &Job) -> anyhow::Result<Option<Job>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    /// Cheap connectivity check for health probes
    async fn ping(&self) -> anyhow::Result<()>;

    /// Release held resources during shutdown
    async fn close(&self) {}
}
