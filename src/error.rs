//! Error types for universal-pwa
//!
//! Detection and config derivation never fail; they degrade to low-confidence
//! or empty results. The errors here cover the three places that can fail
//! outright: reading a single project file, building a configuration, and
//! talking to the remote generation service.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading a single file through the project scanner
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// The requested path does not exist under the project root
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but could not be read or decoded
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Failure talking to the remote generation service
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established
    #[error("Cannot reach API at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("API request timed out after {seconds}s: {source}")]
    Timeout {
        seconds: u64,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status (after retries, for retryable statuses)
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Any other request failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// HTTP status code, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Top-level error returned by client and registry operations
#[derive(Debug, Error)]
pub enum PwaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to scan project: {0}")]
    Scan(#[source] TransportError),

    #[error("Failed to generate PWA: {0}")]
    Generation(#[source] TransportError),

    #[error("Failed to validate project: {0}")]
    Validation(#[source] TransportError),

    /// No local integration produced any evidence
    #[error("No supported backend framework detected in {}", .0.display())]
    FrameworkNotDetected(PathBuf),

    /// A valid backend name with no local integration
    #[error("Backend '{0}' has no local integration")]
    UnsupportedBackend(String),
}
