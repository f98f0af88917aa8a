//! HTTP client with rate limiting awareness.
//!
//! Provides a wrapper around reqwest with:
//! - Rate limit tracking from response headers
//! - Automatic throttling when approaching limits
//! - Configurable timeouts
//! - User-agent management

use crate::config::NetworkConfig;
use crate::{Result, ScoreError};
use reqwest::{header, Client, Response, StatusCode};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Rate limit state extracted from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimitState {
    /// Remaining requests allowed.
    pub remaining: Option<u64>,
    /// Total request limit.
    pub limit: Option<u64>,
    /// Unix timestamp when the rate limit resets.
    pub reset: Option<u64>,
}

impl RateLimitState {
    /// Check if we should throttle requests.
    pub fn should_throttle(&self) -> bool {
        match (self.remaining, self.limit) {
            (Some(remaining), Some(limit)) if limit > 0 => {
                // Throttle when below 10% of limit
                let threshold = (limit as f64 * 0.1) as u64;
                remaining < threshold.max(1)
            }
            _ => false,
        }
    }

    /// Get time until rate limit resets.
    pub fn time_until_reset(&self) -> Option<Duration> {
        self.reset.and_then(|reset| {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            if reset > now {
                Some(Duration::from_secs(reset - now))
            } else {
                None
            }
        })
    }
}

/// HTTP client with rate limiting awareness.
pub struct HttpClient {
    client: Client,
    /// Rate limit state (shared for thread safety).
    rate_limit_remaining: AtomicI64,
    rate_limit_limit: AtomicU64,
    rate_limit_reset: AtomicU64,
    /// Throttle delay when rate limited.
    throttle_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the default request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a new HTTP client with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| ScoreError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: Some(e.to_string()),
            })?;

        Ok(Self {
            client,
            rate_limit_remaining: AtomicI64::new(-1),
            rate_limit_limit: AtomicU64::new(0),
            rate_limit_reset: AtomicU64::new(0),
            throttle_delay: Duration::from_millis(500),
        })
    }

    /// Get the current rate limit state.
    pub fn rate_limit_state(&self) -> RateLimitState {
        let remaining = self.rate_limit_remaining.load(Ordering::SeqCst);
        RateLimitState {
            remaining: if remaining >= 0 {
                Some(remaining as u64)
            } else {
                None
            },
            limit: {
                let limit = self.rate_limit_limit.load(Ordering::SeqCst);
                if limit > 0 {
                    Some(limit)
                } else {
                    None
                }
            },
            reset: {
                let reset = self.rate_limit_reset.load(Ordering::SeqCst);
                if reset > 0 {
                    Some(reset)
                } else {
                    None
                }
            },
        }
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.get_with_headers(url, &[]).await
    }

    /// Make a GET request with custom headers.
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<Response> {
        self.maybe_throttle().await;

        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(|e| ScoreError::Network {
            message: format!("GET {} failed: {}", url, e),
            cause: Some(e.to_string()),
        })?;

        self.update_rate_limits(&response);
        self.check_response_status(response, url)
    }

    /// Make a HEAD request.
    pub async fn head(&self, url: &str) -> Result<Response> {
        self.maybe_throttle().await;

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| ScoreError::Network {
                message: format!("HEAD {} failed: {}", url, e),
                cause: Some(e.to_string()),
            })?;

        self.update_rate_limits(&response);
        self.check_response_status(response, url)
    }

    /// Make a POST request with JSON body and bearer auth.
    pub async fn post_json<T: serde::Serialize>(
        &self,
        url: &str,
        bearer: &str,
        body: &T,
    ) -> Result<Response> {
        self.maybe_throttle().await;

        let response = self
            .client
            .post(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await
            .map_err(|e| ScoreError::Network {
                message: format!("POST {} failed: {}", url, e),
                cause: Some(e.to_string()),
            })?;

        self.update_rate_limits(&response);
        self.check_response_status(response, url)
    }

    /// Check if an HTTP status code indicates a retryable error.
    pub fn is_retryable_status(status: StatusCode) -> bool {
        matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
    }

    // Internal methods

    async fn maybe_throttle(&self) {
        let state = self.rate_limit_state();
        if state.should_throttle() {
            warn!(
                "Rate limit approaching (remaining: {:?}/{:?}), throttling for {:?}",
                state.remaining, state.limit, self.throttle_delay
            );
            tokio::time::sleep(self.throttle_delay).await;
        }
    }

    fn update_rate_limits(&self, response: &Response) {
        let headers = response.headers();

        if let Some(remaining) = headers.get("X-RateLimit-Remaining") {
            if let Ok(value) = remaining.to_str() {
                if let Ok(num) = value.parse::<i64>() {
                    self.rate_limit_remaining.store(num, Ordering::SeqCst);
                }
            }
        }

        if let Some(limit) = headers.get("X-RateLimit-Limit") {
            if let Ok(value) = limit.to_str() {
                if let Ok(num) = value.parse::<u64>() {
                    self.rate_limit_limit.store(num, Ordering::SeqCst);
                }
            }
        }

        if let Some(reset) = headers.get("X-RateLimit-Reset") {
            if let Ok(value) = reset.to_str() {
                if let Ok(num) = value.parse::<u64>() {
                    self.rate_limit_reset.store(num, Ordering::SeqCst);
                }
            }
        }

        let remaining = self.rate_limit_remaining.load(Ordering::SeqCst);
        let limit = self.rate_limit_limit.load(Ordering::SeqCst);
        if remaining >= 0 && limit > 0 {
            debug!("Rate limit: {}/{}", remaining, limit);
        }
    }

    fn check_response_status(&self, response: Response, url: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting specifically
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());

            return Err(ScoreError::RateLimited {
                service: extract_domain(url),
                retry_after_secs: retry_after,
            });
        }

        // Return the response for other error codes (caller may want to handle them)
        Ok(response)
    }
}

/// Extract domain from a URL.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
