//! Shared HTTP client settings and retry loop for outbound REST adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::warn;

use crate::error::Result;

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    5000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    500
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

/// `reqwest` client that retries timeouts and connect failures.
///
/// Responses are returned whatever their status; callers decide what a
/// 4xx or 5xx means for them.
#[derive(Clone)]
pub struct RetryingClient {
    http: Client,
    max_attempts: u32,
    backoff: Duration,
}

impl RetryingClient {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Self {
            http,
            max_attempts: config.retry_max_attempts.max(1),
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Send the request built by `build`, rebuilding it for each attempt.
    ///
    /// # Errors
    /// Returns the last transport error once attempts are exhausted, or the
    /// first non-retryable one.
    pub async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match build(&self.http).send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt >= self.max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts = self.max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if !self.backoff.is_zero() {
            sleep(self.backoff).await;
        }
    }
}
