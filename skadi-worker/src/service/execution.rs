//! Execution service
//!
//! Runs the caller's handler on a fetched job. A handler error is a business
//! failure: it becomes a failure report, never an error of the worker loop.

use async_trait::async_trait;
use skadi_core::domain::job::Job;
use tracing::{debug, warn};

/// Error type handlers may return
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result text sent when a handler fails with an empty error message
const EMPTY_FAILURE_TEXT: &str = "job failed without an error message";

/// The caller's job processor
///
/// Called once per fetched job with the job id and message. The returned
/// string is reported as the job result. Handlers log their own progress;
/// the worker does not retry them.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, job_id: &str, message: &str) -> Result<String, HandlerError>;
}

/// Adapts a plain closure into a [`Handler`], see [`handler_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FnHandler<F>(F);

/// Wraps a synchronous closure as a [`Handler`]
///
/// # Example
/// ```
/// use skadi_worker::handler_fn;
///
/// let handler = handler_fn(|_job_id: &str, message: &str| -> Result<String, std::io::Error> {
///     Ok(message.to_uppercase())
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, E>(f: F) -> FnHandler<F>
where
    F: Fn(&str, &str) -> Result<String, E> + Send + Sync,
    E: Into<HandlerError> + 'static,
{
    FnHandler(f)
}

#[async_trait]
impl<F, E> Handler for FnHandler<F>
where
    F: Fn(&str, &str) -> Result<String, E> + Send + Sync,
    E: Into<HandlerError> + 'static,
{
    async fn handle(&self, job_id: &str, message: &str) -> Result<String, HandlerError> {
        (self.0)(job_id, message).map_err(Into::into)
    }
}

/// What happened when the handler ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The handler returned this result
    Succeeded(String),
    /// The handler failed; the text describes the error and is never empty
    Failed(String),
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The text that goes into the report body
    pub fn result(&self) -> &str {
        match self {
            Self::Succeeded(result) | Self::Failed(result) => result,
        }
    }
}

/// Invokes handlers
#[derive(Debug, Default, Clone, Copy)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Runs `handler` exactly once on `job`
    pub async fn execute<H: Handler + ?Sized>(&self, job: &Job, handler: &H) -> ExecutionOutcome {
        debug!("Executing job {}", job.id);

        match handler.handle(&job.id, &job.message).await {
            Ok(result) => ExecutionOutcome::Succeeded(result),
            Err(e) => {
                let mut text = e.to_string();
                if text.trim().is_empty() {
                    text = EMPTY_FAILURE_TEXT.to_string();
                }
                warn!("Job {} failed: {}", job.id, text);
                ExecutionOutcome::Failed(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn job(id: &str, message: &str) -> Job {
        Job {
            id: id.to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn test_handler_receives_id_and_message() {
        let calls = Mutex::new(Vec::new());
        let handler = handler_fn(|id: &str, message: &str| -> Result<String, HandlerError> {
            calls.lock().unwrap().push((id.to_string(), message.to_string()));
            Ok("pong".to_string())
        });

        let outcome = Executor::new().execute(&job("j1", "ping"), &handler).await;

        assert_eq!(outcome, ExecutionOutcome::Succeeded("pong".to_string()));
        assert_eq!(
            *calls.lock().unwrap(),
            vec![("j1".to_string(), "ping".to_string())]
        );
    }

    #[tokio::test]
    async fn test_handler_error_becomes_failure() {
        let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
            Err("disk full".into())
        });

        let outcome = Executor::new().execute(&job("j2", "backup"), &handler).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.result(), "disk full");
    }

    #[tokio::test]
    async fn test_empty_error_text_is_replaced() {
        let handler =
            handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> { Err("".into()) });

        let outcome = Executor::new().execute(&job("j3", "noop"), &handler).await;

        assert_eq!(outcome, ExecutionOutcome::Failed(EMPTY_FAILURE_TEXT.to_string()));
    }

    #[tokio::test]
    async fn test_async_handler() {
        struct Echo;

        #[async_trait]
        impl Handler for Echo {
            async fn handle(&self, job_id: &str, message: &str) -> Result<String, HandlerError> {
                tokio::task::yield_now().await;
                Ok(format!("{}:{}", job_id, message))
            }
        }

        let outcome = Executor::new().execute(&job("j4", "hi"), &Echo).await;
        assert_eq!(outcome.result(), "j4:hi");
    }
}
