//! Authenticated transport
//!
//! Every request to the skadi server carries the agent token as a bearer
//! credential and a JSON content type. Both are installed as default headers
//! on the `reqwest::Client`, so they are applied on the send path of every
//! request without the endpoint code knowing about them.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Request timeout used when none (or zero) is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Headers attached to every request made with `token`
pub fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
        ClientError::InvalidRequest("token contains characters not allowed in a header".into())
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Builds an HTTP client that authenticates as the agent owning `token`
///
/// A zero `timeout` falls back to [`DEFAULT_REQUEST_TIMEOUT`].
pub fn build_http_client(token: &str, timeout: Duration) -> Result<Client> {
    let timeout = if timeout.is_zero() {
        DEFAULT_REQUEST_TIMEOUT
    } else {
        timeout
    };

    Client::builder()
        .default_headers(auth_headers(token)?)
        .timeout(timeout)
        .build()
        .map_err(ClientError::from)
}
