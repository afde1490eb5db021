//! Message DTOs

use serde::{Deserialize, Serialize};

/// Body of the info/warning messages and of "add job to another agent"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
