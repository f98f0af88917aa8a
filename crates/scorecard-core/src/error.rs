//! Error types for the scoring engine.
//!
//! Errors exist only below the fetcher boundary: the network layer and the
//! engine constructor return them, the fetcher swallows them into documented
//! defaults, and `evaluate()` itself is infallible.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the scorecard library.
#[derive(Debug, Error)]
pub enum ScoreError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Rate limited by {service}, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        service: String,
        retry_after_secs: Option<u64>,
    },

    // Upstream API errors
    #[error("{service} API error: {message}")]
    HubApi {
        service: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // LLM analysis errors (caught at the analysis boundary)
    #[error("LLM analysis error: {message}")]
    Llm { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for scorecard operations.
pub type Result<T> = std::result::Result<T, ScoreError>;

// Conversion implementations for common error types

impl From<reqwest::Error> for ScoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScoreError::Timeout(Duration::from_secs(0))
        } else {
            ScoreError::Network {
                message: err.to_string(),
                cause: Some(err.to_string()),
            }
        }
    }
}

impl From<serde_json::Error> for ScoreError {
    fn from(err: serde_json::Error) -> Self {
        ScoreError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ScoreError {
    /// Check if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ScoreError::Network { .. } | ScoreError::Timeout(_) | ScoreError::RateLimited { .. }
        )
    }
}
