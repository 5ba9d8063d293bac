use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::JobStore;
use crate::api::job::{Job, JobFilter};

/// Job store kept in process memory, used by `serve --in-memory` and tests.
#[derive(Default)]
pub struct MemoryJobStore {
    // insertion order; listing walks it backwards so ties on
    // created_at resolve newest-first
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, job: &Job) -> anyhow::Result<Job> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|existing| existing.id == job.id) {
            bail!("duplicate job id {}", job.id);
        }
        jobs.push(job.clone());
        debug!("Stored job {} in memory ({} total)", job.id, jobs.len());
        Ok(job.clone())
    }

    async fn list(&self, filter: &JobFilter) -> anyhow::Result<Vec<Job>> {
        let jobs = self.jobs.read().await;
        let mut matching: Vec<Job> = jobs
            .iter()
            .rev()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn update(&self, job: &Job) -> anyhow::Result<Option<Job>> {
        let mut jobs = self.jobs.write().await;
        match jobs.iter_mut().find(|existing| existing.id == job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(Some(job.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        Ok(jobs.len() < before)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
