//! Report service
//!
//! Tells the server how a job ended. Reporting is best effort: the server
//! owns job state and times out jobs it never hears back about, so a failed
//! report is logged and dropped. It is never retried and the job is never
//! executed again.

use skadi_core::domain::job::JobResult;
use std::sync::Arc;
use tracing::{debug, error};

use crate::repository::JobRepository;
use crate::service::ExecutionOutcome;

/// Sends success/failure reports for executed jobs
pub struct Reporter<R> {
    repository: Arc<R>,
}

impl<R: JobRepository> Reporter<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Reports `outcome` for `job_id` on the matching endpoint
    pub async fn report(&self, job_id: &str, outcome: &ExecutionOutcome) {
        match outcome {
            ExecutionOutcome::Succeeded(result) => self.report_success(job_id, result).await,
            ExecutionOutcome::Failed(text) => self.report_fail(job_id, text).await,
        }
    }

    /// Marks `job_id` as succeeded with `result`
    pub async fn report_success(&self, job_id: &str, result: &str) {
        match self
            .repository
            .succeed_job(job_id, &JobResult::new(result))
            .await
        {
            Ok(()) => debug!("Reported job {} succeeded", job_id),
            Err(e) => error!("Failed to report job {} succeeded: {}", job_id, e),
        }
    }

    /// Marks `job_id` as failed, `text` describing the failure
    pub async fn report_fail(&self, job_id: &str, text: &str) {
        match self
            .repository
            .fail_job(job_id, &JobResult::new(text))
            .await
        {
            Ok(()) => debug!("Reported job {} failed", job_id),
            Err(e) => error!("Failed to report job {} failed: {}", job_id, e),
        }
    }
}
