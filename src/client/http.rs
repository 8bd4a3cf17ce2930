//! Blocking JSON transport with retries
//!
//! Retry strategy:
//! - HTTP 429, 500, 502, 503, 504 → retry with exponential backoff
//! - Connection failure → retry, then surface as unreachable
//! - Timeout → fail immediately
//! - Any other non-2xx → fail immediately with status and body

use crate::error::TransportError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Statuses worth retrying: rate limiting and transient server failures
pub const RETRY_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// How many times, and how patiently, a failed request is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: Duration::ZERO,
        }
    }

    /// Sleep before retry number `attempt` (1-based): factor * 2^(attempt-1)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 1).min(16);
        self.backoff_factor.saturating_mul(1 << exponent)
    }

    pub fn retries_status(&self, status: u16) -> bool {
        RETRY_STATUSES.contains(&status)
    }
}

/// JSON-over-HTTP client for the generation service
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout_secs: u64,
    retry: RetryPolicy,
    client: Client,
}

impl HttpClient {
    /// Client for `base_url` (trailing `/` trimmed) with a per-request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("universal-pwa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            retry: RetryPolicy::default(),
            client,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;

        loop {
            debug!(url = %url, attempt, "POST");

            match self.client.post(&url).json(body).send() {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let text = response.text().map_err(|e| self.request_error(e))?;
                        return Ok(serde_json::from_str(&text)?);
                    }

                    let code = status.as_u16();
                    let body_text = response.text().unwrap_or_default();

                    if self.retry.retries_status(code) && attempt < self.retry.max_retries {
                        attempt += 1;
                        self.back_off(&url, attempt, &format!("HTTP {}", code));
                        continue;
                    }

                    return Err(TransportError::Status {
                        status: code,
                        body: body_text,
                    });
                }
                Err(e) if e.is_timeout() => return Err(self.request_error(e)),
                Err(e) if e.is_connect() => {
                    if attempt < self.retry.max_retries {
                        attempt += 1;
                        self.back_off(&url, attempt, &e.to_string());
                        continue;
                    }
                    return Err(TransportError::Unreachable { url, source: e });
                }
                Err(e) => return Err(self.request_error(e)),
            }
        }
    }

    /// Timeouts can surface from `send()` or while reading the body
    fn request_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                seconds: self.timeout_secs,
                source: e,
            }
        } else {
            TransportError::Request(e)
        }
    }

    fn back_off(&self, url: &str, attempt: u32, reason: &str) {
        let delay = self.retry.delay_for(attempt);
        warn!(
            url = %url,
            attempt,
            max_retries = self.retry.max_retries,
            delay_ms = delay.as_millis() as u64,
            reason,
            "Retrying request"
        );
        thread::sleep(delay);
    }
}
