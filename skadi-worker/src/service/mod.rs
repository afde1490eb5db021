//! Service layer
//!
//! Runs the caller's handler on a fetched job and reports the outcome back
//! to the server.

mod execution;
mod report;

pub use execution::{ExecutionOutcome, Executor, FnHandler, Handler, HandlerError, handler_fn};
pub use report::Reporter;
