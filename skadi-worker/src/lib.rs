//! Skadi Worker
//!
//! Runs an agent as a worker for the skadi job queue: poll the server for
//! one job on a fixed interval, hand it to a handler, report the outcome.
//!
//! Architecture:
//! - Configuration: poll interval and request timeout
//! - Repository: the poll/report endpoints behind a trait
//! - Services: handler execution and outcome reporting
//! - Scheduler: the poller and the worker loop
//!
//! The loop stops cleanly when its cancellation token fires, and with an
//! error when the server rejects the token or sends a job this agent cannot
//! decode. Every other failure is logged and retried on the next tick.
//!
//! # Example
//!
//! ```no_run
//! use skadi_worker::{Worker, WorkerConfig, handler_fn};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), skadi_worker::WorkerError> {
//!     let mut worker = Worker::connect("https://api.letserver.run", "token", WorkerConfig::default())?;
//!     let handler = handler_fn(|_id: &str, message: &str| -> Result<String, std::io::Error> {
//!         Ok(format!("got {}", message))
//!     });
//!
//!     worker.run(&handler, CancellationToken::new()).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use repository::JobRepository;
pub use scheduler::{PollOutcome, Poller, TickOutcome, Worker, WorkerState};
pub use service::{
    ExecutionOutcome, Executor, FnHandler, Handler, HandlerError, Reporter, handler_fn,
};
pub use tokio_util::sync::CancellationToken;
