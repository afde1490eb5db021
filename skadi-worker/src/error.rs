//! Error types for the worker

use skadi_client::ClientError;
use thiserror::Error;

/// Conditions that stop the worker loop
///
/// Cooperative cancellation is not an error; `run` returns `Ok(())` for it.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The server rejected the agent token
    #[error("invalid token")]
    InvalidToken,

    /// The server sent a job this agent cannot decode
    #[error("invalid job body, please upgrade your agent: {0}")]
    IncompatibleJob(String),

    /// The worker could not be built
    #[error(transparent)]
    Client(#[from] ClientError),
}
