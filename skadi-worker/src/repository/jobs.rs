//! Jobs repository
//!
//! The three server calls the worker loop needs:
//! - Fetching the next job
//! - Marking a job succeeded
//! - Marking a job failed

use async_trait::async_trait;
use skadi_client::{AgentClient, Result};
use skadi_core::domain::job::{Job, JobResult};
use std::sync::Arc;

/// Repository trait for the worker endpoints of the server
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Fetches the next pending job, `None` when the queue is empty
    async fn fetch_job(&self) -> Result<Option<Job>>;

    /// Marks a job as succeeded
    ///
    /// # Arguments
    /// * `job_id` - The id of the job that ran
    /// * `result` - The handler output
    async fn succeed_job(&self, job_id: &str, result: &JobResult) -> Result<()>;

    /// Marks a job as failed
    ///
    /// # Arguments
    /// * `job_id` - The id of the job that ran
    /// * `result` - Description of the failure
    async fn fail_job(&self, job_id: &str, result: &JobResult) -> Result<()>;
}

#[async_trait]
impl JobRepository for AgentClient {
    async fn fetch_job(&self) -> Result<Option<Job>> {
        AgentClient::fetch_job(self).await
    }

    async fn succeed_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        AgentClient::succeed_job(self, job_id, result).await
    }

    async fn fail_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        AgentClient::fail_job(self, job_id, result).await
    }
}

#[async_trait]
impl<R: JobRepository + ?Sized> JobRepository for Arc<R> {
    async fn fetch_job(&self) -> Result<Option<Job>> {
        (**self).fetch_job().await
    }

    async fn succeed_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        (**self).succeed_job(job_id, result).await
    }

    async fn fail_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        (**self).fail_job(job_id, result).await
    }
}
