//! Worker loop
//!
//! Wakes on a fixed interval, polls for one job, runs the handler on it and
//! reports the outcome, all before the next tick. At most one job is ever in
//! flight: the next poll is only issued once the previous job is reported.
//!
//! Cancellation is checked at tick boundaries only. A poll, handler call or
//! report that has started always runs to completion.

use skadi_client::AgentClient;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, Instrument, debug, error, info, info_span};

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::repository::JobRepository;
use crate::scheduler::poller::{PollOutcome, Poller};
use crate::service::{ExecutionOutcome, Executor, Handler, Reporter};

/// Where the worker is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for the next tick
    Idle,
    Polling,
    Executing,
    Reporting,
    /// Terminal; the loop has returned
    Stopped,
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The server had no job
    NoJob,
    /// The poll failed in a way that is retried next tick
    Retry,
    /// A job ran and its outcome was reported (best effort)
    Executed {
        job_id: String,
        outcome: ExecutionOutcome,
    },
}

/// A single sequential worker bound to one agent credential
pub struct Worker<R> {
    config: WorkerConfig,
    poller: Poller<R>,
    executor: Executor,
    reporter: Reporter<R>,
    state: watch::Sender<WorkerState>,
    dispatch: Option<Dispatch>,
}

impl Worker<AgentClient> {
    /// Creates a worker talking to the server at `base_url` as the agent
    /// owning `token`
    ///
    /// Server calls time out after the configured request timeout.
    pub fn connect(base_url: &str, token: &str, config: WorkerConfig) -> Result<Self, WorkerError> {
        let client = AgentClient::with_timeout(base_url, token, config.request_timeout())?;
        Ok(Self::new(client, config))
    }
}

impl<R: JobRepository> Worker<R> {
    /// Creates a worker over any job repository
    pub fn new(repository: R, config: WorkerConfig) -> Self {
        let repository = Arc::new(repository);
        let (state, _) = watch::channel(WorkerState::Idle);

        Self {
            config,
            poller: Poller::new(Arc::clone(&repository)),
            executor: Executor::new(),
            reporter: Reporter::new(repository),
            state,
            dispatch: None,
        }
    }

    /// Sends every event of this worker to `dispatch` instead of the
    /// caller's default subscriber
    pub fn with_dispatch(mut self, dispatch: impl Into<Dispatch>) -> Self {
        self.dispatch = Some(dispatch.into());
        self
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Current state of the loop
    pub fn state(&self) -> WorkerState {
        *self.state.borrow()
    }

    /// Subscribes to state transitions
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state.subscribe()
    }

    /// Runs the worker until `shutdown` is cancelled
    ///
    /// The first poll happens one interval after the call. Returns `Ok(())`
    /// when stopped through `shutdown`, and an error when the token is
    /// rejected or the server sends a job this agent cannot decode.
    pub async fn run<H: Handler + ?Sized>(
        &mut self,
        handler: &H,
        shutdown: CancellationToken,
    ) -> Result<(), WorkerError> {
        let dispatch = self.dispatch.clone();
        scoped(dispatch, async {
            let span = info_span!("worker", interval = ?self.config.poll_interval());
            self.run_loop(handler, shutdown).instrument(span).await
        })
        .await
    }

    /// Performs one poll, and when a job is fetched, executes and reports it
    ///
    /// Does not wait for a tick and does not look at any cancellation token.
    pub async fn run_once<H: Handler + ?Sized>(
        &mut self,
        handler: &H,
    ) -> Result<TickOutcome, WorkerError> {
        let dispatch = self.dispatch.clone();
        scoped(dispatch, async {
            let result = self.tick(handler).await;
            if result.is_err() {
                self.set_state(WorkerState::Stopped);
            }
            result
        })
        .await
    }

    async fn run_loop<H: Handler + ?Sized>(
        &mut self,
        handler: &H,
        shutdown: CancellationToken,
    ) -> Result<(), WorkerError> {
        let period = self.config.poll_interval();
        info!("Starting worker (interval: {:?})", period);

        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.set_state(WorkerState::Idle);

        let result = loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break Ok(()),
                _ = interval.tick() => {}
            }

            if let Err(e) = self.tick(handler).await {
                break Err(e);
            }
        };

        self.set_state(WorkerState::Stopped);
        match &result {
            Ok(()) => info!("Worker stopped"),
            Err(e) => error!("Worker will exit with error: {}", e),
        }
        result
    }

    async fn tick<H: Handler + ?Sized>(&mut self, handler: &H) -> Result<TickOutcome, WorkerError> {
        self.set_state(WorkerState::Polling);

        let outcome = match self.poller.poll().await {
            PollOutcome::NoJob => TickOutcome::NoJob,
            PollOutcome::Transient(_) => TickOutcome::Retry,
            PollOutcome::AuthRejected => return Err(WorkerError::InvalidToken),
            PollOutcome::Protocol(e) => return Err(WorkerError::IncompatibleJob(e.to_string())),
            PollOutcome::Job(job) => {
                info!("Running job {}", job.id);

                self.set_state(WorkerState::Executing);
                let outcome = self.executor.execute(&job, handler).await;

                self.set_state(WorkerState::Reporting);
                self.reporter.report(&job.id, &outcome).await;

                debug!("Job {} done (success: {})", job.id, outcome.is_success());
                TickOutcome::Executed {
                    job_id: job.id,
                    outcome,
                }
            }
        };

        self.set_state(WorkerState::Idle);
        Ok(outcome)
    }

    fn set_state(&self, state: WorkerState) {
        self.state.send_replace(state);
    }
}

/// Runs `fut` with `dispatch` as its default subscriber, if one is given
async fn scoped<F: Future>(dispatch: Option<Dispatch>, fut: F) -> F::Output {
    match dispatch {
        Some(dispatch) => fut.with_subscriber(dispatch).await,
        None => fut.await,
    }
}
