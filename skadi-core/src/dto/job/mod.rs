//! Job DTOs for enqueueing work

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::duration::format_go_duration;

/// Callback value that turns off every notification for a delayed job
pub const CALLBACK_DISABLED: &str = "disable";

/// What the server should do when a delayed job changes status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Callback {
    /// Notify the agent owner's default IM channel
    #[default]
    Default,
    /// No notification at all
    Disabled,
    /// POST the job status to this URL
    Url(String),
}

impl Callback {
    fn into_wire(self) -> Option<String> {
        match self {
            Callback::Default => None,
            Callback::Disabled => Some(CALLBACK_DISABLED.to_string()),
            Callback::Url(url) => Some(url),
        }
    }
}

/// Request to add a delayed job to this agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedJobInput {
    pub message: String,
    /// Go-style duration string, e.g. `1m30s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

impl DelayedJobInput {
    pub fn new(message: impl Into<String>, after: Duration, callback: Callback) -> Self {
        Self {
            message: message.into(),
            duration: Some(format_go_duration(after)),
            callback: callback.into_wire(),
        }
    }
}
