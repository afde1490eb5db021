//! Message endpoints
//!
//! Push notifications to the agent owner's default IM channel.

use crate::AgentClient;
use crate::error::Result;
use skadi_core::dto::message::MessageBody;

impl AgentClient {
    /// Send an info level message
    pub async fn send_info(&self, message: &str) -> Result<()> {
        self.post_created(&["agent", "info"], &MessageBody::new(message))
            .await
    }

    /// Send a warning level message
    pub async fn send_warning(&self, message: &str) -> Result<()> {
        self.post_created(&["agent", "warning"], &MessageBody::new(message))
            .await
    }
}
