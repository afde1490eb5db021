//! Skadi HTTP Client
//!
//! A small, type-safe HTTP client for an agent talking to the skadi server.
//!
//! The client covers every agent-facing endpoint:
//! - Worker endpoints: fetch the next job, report success or failure
//! - Job enqueueing: hand a job to another agent, schedule delayed jobs
//! - Messages: push info/warning notifications to the owner's IM channel
//!
//! # Example
//!
//! ```no_run
//! use skadi_client::AgentClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AgentClient::new("https://api.letserver.run", "my-agent-token")?;
//!
//!     client.send_info("backup finished").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod messages;
pub mod transport;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use skadi_core::domain::job::{Job, JobResult};
pub use skadi_core::dto::job::{Callback, DelayedJobInput};
pub use transport::DEFAULT_REQUEST_TIMEOUT;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the skadi agent API
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AgentClient {
    /// Base URL of the server, without a trailing slash
    base: Url,
    /// HTTP client instance, already carrying the agent credential
    client: Client,
}

impl AgentClient {
    /// Create a new client for the agent owning `token`
    ///
    /// Requests time out after [`DEFAULT_REQUEST_TIMEOUT`].
    ///
    /// # Example
    /// ```
    /// use skadi_client::AgentClient;
    ///
    /// let client = AgentClient::new("http://localhost:8080", "token").unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// ```
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::with_timeout(base_url, token, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new client with a custom request timeout
    ///
    /// A zero timeout falls back to the default.
    pub fn with_timeout(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = transport::build_http_client(token, timeout)?;
        Self::with_client(base_url, client)
    }

    /// Create a new client around a pre-built HTTP client
    ///
    /// The caller is responsible for the credential headers; see
    /// [`transport::auth_headers`].
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            base: parse_base_url(base_url)?,
            client,
        })
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Builds the URL of an endpoint below the base URL
    ///
    /// Each segment is percent-encoded, so an opaque job id always stays a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check that the response carries the `expected` status
    ///
    /// 401 becomes [`ClientError::Unauthorized`]; any other status becomes an
    /// API error carrying the response body.
    async fn expect_status(
        &self,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<reqwest::Response> {
        let status = response.status();

        if status == expected {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::api_error(status.as_u16(), error_text))
    }

    /// POST a JSON body to an endpoint that answers 201 Created
    async fn post_created<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<()> {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;

        self.expect_status(response, StatusCode::CREATED).await?;
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ClientError::InvalidRequest(format!("invalid server address {:?}: {}", base_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidRequest(format!(
            "server address must start with http:// or https://, got {:?}",
            base_url
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ClientError::InvalidRequest(format!(
            "server address {:?} has no host",
            base_url
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AgentClient::new("http://localhost:8080", "token").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AgentClient::new("http://localhost:8080/", "token").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = AgentClient::with_client("http://localhost:8080", http_client).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_invalid_server_address() {
        assert!(AgentClient::new("", "token").is_err());
        assert!(AgentClient::new("localhost:8080", "token").is_err());
        assert!(AgentClient::new("ftp://files.example.com", "token").is_err());
        assert!(AgentClient::new("not a url", "token").is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = AgentClient::new("https://example.com/skadi/", "token").unwrap();
        let url = client.endpoint(&["agent", "job"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/skadi/agent/job");
    }

    #[test]
    fn test_endpoint_encodes_job_id() {
        let client = AgentClient::new("http://localhost:8080", "token").unwrap();
        let url = client
            .endpoint(&["agent", "jobs", "a/b c", "succeed"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/agent/jobs/a%2Fb%20c/succeed"
        );
    }
}
