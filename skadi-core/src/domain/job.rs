//! Job domain types

use serde::{Deserialize, Serialize};

/// A unit of work dispatched by the server to this agent
///
/// The id is opaque to the agent and is only echoed back when reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub message: String,
}

/// Payload sent back for both the success and the failure report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub result: String,
}

impl JobResult {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}
