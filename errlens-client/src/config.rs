//! Connection settings for [`crate::ClassifierClient`].

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub const CLASSIFY_PATH: &str = "/api/classify";
pub const EXAMPLES_PATH: &str = "/api/examples";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority of the service, optionally with a path prefix.
    pub base_url: String,
    /// Deadline for each request, connect through body.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
