//! In-memory repository used by the unit tests

use async_trait::async_trait;
use skadi_client::{ClientError, Result};
use skadi_core::domain::job::{Job, JobResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::repository::JobRepository;

pub fn job(id: &str, message: &str) -> Job {
    Job {
        id: id.to_string(),
        message: message.to_string(),
    }
}

/// Answers polls from a script, then with "no job"; records every report
#[derive(Default)]
pub struct FakeRepository {
    polls: Mutex<VecDeque<Result<Option<Job>>>>,
    poll_times: Mutex<Vec<Instant>>,
    poll_count: AtomicUsize,
    succeeded: Mutex<Vec<(String, String)>>,
    failed: Mutex<Vec<(String, String)>>,
    reject_reports: bool,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl FakeRepository {
    pub fn with_polls(polls: Vec<Result<Option<Job>>>) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            ..Default::default()
        }
    }

    /// Cancels `token` while serving the `polls`-th poll
    pub fn cancel_after(mut self, polls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((polls, token));
        self
    }

    /// Makes every report fail with a server error
    pub fn rejecting_reports(mut self) -> Self {
        self.reject_reports = true;
        self
    }

    pub fn poll_count(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }

    pub fn poll_times(&self) -> Vec<Instant> {
        self.poll_times.lock().unwrap().clone()
    }

    pub fn succeeded(&self) -> Vec<(String, String)> {
        self.succeeded.lock().unwrap().clone()
    }

    pub fn failed(&self) -> Vec<(String, String)> {
        self.failed.lock().unwrap().clone()
    }

    fn record(&self, reports: &Mutex<Vec<(String, String)>>, job_id: &str, result: &JobResult) -> Result<()> {
        reports
            .lock()
            .unwrap()
            .push((job_id.to_string(), result.result.clone()));
        if self.reject_reports {
            return Err(ClientError::api_error(500, "report store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl JobRepository for FakeRepository {
    async fn fetch_job(&self) -> Result<Option<Job>> {
        let count = self.poll_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.poll_times.lock().unwrap().push(Instant::now());

        if let Some((after, token)) = &self.cancel_after {
            if count >= *after {
                token.cancel();
            }
        }

        self.polls.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }

    async fn succeed_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        self.record(&self.succeeded, job_id, result)
    }

    async fn fail_job(&self, job_id: &str, result: &JobResult) -> Result<()> {
        self.record(&self.failed, job_id, result)
    }
}
