//! Job poller
//!
//! Asks the server for the next job and classifies the answer. Only a
//! rejected token and an undecodable job stop the worker; both are
//! conditions a retry cannot fix. Everything else is retried on the next
//! tick.

use skadi_client::ClientError;
use skadi_core::domain::job::Job;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::repository::JobRepository;

/// Classified result of one poll
#[derive(Debug)]
pub enum PollOutcome {
    /// The queue is empty
    NoJob,
    /// A job was fetched and must be reported before the next poll
    Job(Job),
    /// The token was rejected
    AuthRejected,
    /// Network failure, timeout or unexpected status; retried next tick
    Transient(ClientError),
    /// The server sent a job body this agent cannot decode
    Protocol(ClientError),
}

impl PollOutcome {
    /// Maps the raw fetch result onto the worker's error policy
    pub fn classify(result: skadi_client::Result<Option<Job>>) -> Self {
        match result {
            Ok(None) => Self::NoJob,
            Ok(Some(job)) => Self::Job(job),
            Err(ClientError::Unauthorized) => Self::AuthRejected,
            Err(e @ ClientError::ParseError(_)) => Self::Protocol(e),
            Err(e) => Self::Transient(e),
        }
    }

    /// Whether this outcome stops the worker loop
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AuthRejected | Self::Protocol(_))
    }
}

/// Fetches at most one job per call
pub struct Poller<R> {
    repository: Arc<R>,
}

impl<R: JobRepository> Poller<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Performs a single poll
    pub async fn poll(&self) -> PollOutcome {
        debug!("Polling for a job");

        let outcome = PollOutcome::classify(self.repository.fetch_job().await);

        match &outcome {
            PollOutcome::NoJob => debug!("No job available"),
            PollOutcome::Job(job) => debug!("Fetched job {}", job.id),
            PollOutcome::Transient(e) if e.is_timeout() => {
                warn!("Timed out fetching job, retrying next tick: {}", e)
            }
            PollOutcome::Transient(e) => warn!("Failed to fetch job, retrying next tick: {}", e),
            PollOutcome::AuthRejected | PollOutcome::Protocol(_) => {}
        }

        outcome
    }
}
