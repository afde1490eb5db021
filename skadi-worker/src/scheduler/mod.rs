//! Scheduler layer for the worker
//!
//! This layer polls the server for a job on a fixed interval and drives a
//! fetched job through execution and reporting before the next poll.

pub mod poller;
pub mod worker;

pub use poller::{PollOutcome, Poller};
pub use worker::{TickOutcome, Worker, WorkerState};
