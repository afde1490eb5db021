//! Configuration module
//!
//! Handles CLI configuration: which server to talk to and as which agent.

use anyhow::{Context, Result};
use skadi_client::AgentClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the skadi server
    pub server: String,
    /// Agent token
    pub token: String,
    /// Timeout of each server call
    pub timeout: Duration,
}

impl Config {
    /// Builds an authenticated client for this agent
    pub fn client(&self) -> Result<AgentClient> {
        AgentClient::with_timeout(&self.server, &self.token, self.timeout)
            .context("Failed to create skadi client")
    }
}
