//! Job-related API endpoints

use crate::AgentClient;
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use skadi_core::domain::job::{Job, JobResult};
use skadi_core::dto::job::{Callback, DelayedJobInput};
use skadi_core::dto::message::MessageBody;
use std::time::Duration;
use tracing::debug;

impl AgentClient {
    // =============================================================================
    // Worker Endpoints
    // =============================================================================

    /// Fetch the next pending job for this agent
    ///
    /// # Returns
    /// `None` when the server has nothing to dispatch (204), the job otherwise
    ///
    /// # Errors
    /// - [`ClientError::Unauthorized`] when the token is rejected
    /// - [`ClientError::ParseError`] when a 200 body is not a job
    /// - [`ClientError::ApiError`] for any other status
    /// - [`ClientError::RequestFailed`] for network failures and timeouts
    pub async fn fetch_job(&self) -> Result<Option<Job>> {
        let url = self.endpoint(&["agent", "job"])?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = self.expect_status(response, StatusCode::OK).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse job body: {}", e)))
    }

    /// Mark a job as succeeded
    ///
    /// # Arguments
    /// * `job_id` - The id of the job, as received from [`fetch_job`](Self::fetch_job)
    /// * `result` - The handler output
    pub async fn succeed_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        self.put_job_result(job_id, "succeed", result).await
    }

    /// Mark a job as failed
    ///
    /// # Arguments
    /// * `job_id` - The id of the job, as received from [`fetch_job`](Self::fetch_job)
    /// * `result` - Description of the failure
    pub async fn fail_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        self.put_job_result(job_id, "fail", result).await
    }

    async fn put_job_result(&self, job_id: &str, action: &str, result: &JobResult) -> Result<()> {
        let url = self.endpoint(&["agent", "jobs", job_id, action])?;
        debug!("PUT {}", url);
        let response = self.client.put(url).json(result).send().await?;

        self.expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    // =============================================================================
    // Job Enqueueing
    // =============================================================================

    /// Hand a job to another agent, the same way it is typed in IM
    ///
    /// # Arguments
    /// * `content` - `<AgentName> <Job>`
    pub async fn add_job_to_other(&self, content: &str) -> Result<()> {
        self.post_created(&["agent", "job", "add"], &MessageBody::new(content))
            .await
    }

    /// Add a delayed job to this agent
    ///
    /// The owner's default IM channel is notified when the job changes status.
    ///
    /// # Example
    /// ```no_run
    /// # use skadi_client::AgentClient;
    /// # use std::time::Duration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = AgentClient::new("http://localhost:8080", "token")?;
    /// client.add_delayed_job("backup db", Duration::from_secs(600)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_delayed_job(&self, message: &str, after: Duration) -> Result<()> {
        self.add_delayed(DelayedJobInput::new(message, after, Callback::Default))
            .await
    }

    /// Add a delayed job to this agent without any status notification
    pub async fn add_delayed_job_silent(&self, message: &str, after: Duration) -> Result<()> {
        self.add_delayed(DelayedJobInput::new(message, after, Callback::Disabled))
            .await
    }

    /// Add a delayed job to this agent, reporting its status to `callback`
    ///
    /// The server POSTs the job record to the callback URL whenever the job
    /// status changes, instead of notifying the IM channel.
    pub async fn add_delayed_job_with_callback(
        &self,
        message: &str,
        after: Duration,
        callback: impl Into<String>,
    ) -> Result<()> {
        self.add_delayed(DelayedJobInput::new(
            message,
            after,
            Callback::Url(callback.into()),
        ))
        .await
    }

    /// Add a delayed job with an explicit callback policy
    pub async fn add_delayed(&self, input: DelayedJobInput) -> Result<()> {
        self.post_created(&["agent", "job", "delayed"], &input).await
    }
}
