//! Worker configuration
//!
//! Defines the poll interval and the per-request timeout of a worker.

use std::time::Duration;

/// Poll interval used when none (or zero) is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Longest accepted poll interval, larger values are clamped to it
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Request timeout used when none (or zero) is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = skadi_client::DEFAULT_REQUEST_TIMEOUT;

/// Poll interval in seconds
pub const POLL_INTERVAL_ENV: &str = "SKADI_POLL_INTERVAL";

/// Request timeout in milliseconds
pub const REQUEST_TIMEOUT_ENV: &str = "SKADI_TIMEOUT_MS";

/// Worker configuration
///
/// Immutable once the worker is built. Zero durations are replaced by the
/// defaults, so every value held here is usable as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    /// How often to poll the server for a job
    poll_interval: Duration,

    /// Maximum time a single server call may take
    request_timeout: Duration,
}

impl WorkerConfig {
    /// Creates a new configuration
    ///
    /// # Arguments
    /// * `poll_interval` - Tick period of the worker loop
    /// * `request_timeout` - Timeout of each poll/report call
    pub fn new(poll_interval: Duration, request_timeout: Duration) -> Self {
        Self::default()
            .with_poll_interval(poll_interval)
            .with_request_timeout(request_timeout)
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SKADI_POLL_INTERVAL (optional, seconds, default: 60)
    /// - SKADI_TIMEOUT_MS (optional, milliseconds, default: 3000)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let poll_interval = read(POLL_INTERVAL_ENV)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let request_timeout = read(REQUEST_TIMEOUT_ENV)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self::new(poll_interval, request_timeout)
    }

    /// Sets the poll interval, zero keeps the default
    ///
    /// Intervals above [`MAX_POLL_INTERVAL`] are clamped to it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = non_zero_or(interval, DEFAULT_POLL_INTERVAL).min(MAX_POLL_INTERVAL);
        self
    }

    /// Sets the request timeout, zero keeps the default
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = non_zero_or(timeout, DEFAULT_REQUEST_TIMEOUT);
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn non_zero_or(value: Duration, default: Duration) -> Duration {
    if value.is_zero() { default } else { value }
}
