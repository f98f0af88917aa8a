//! HuggingFace Hub client.
//!
//! Covers the three access patterns the fetcher needs:
//! - Model/dataset metadata from the JSON API
//! - Raw file content from a repo's main branch (`/raw/main/<file>`)
//! - Weight file sizes via HEAD requests on `/resolve/main/<file>`
//!
//! Reads an optional `HF_TOKEN` from the environment for gated repos.

use crate::config::NetworkConfig;
use crate::models::{HfDatasetInfo, HfModelInfo};
use crate::network::client::HttpClient;
use crate::network::retry::{retry_async, RetryConfig};
use crate::network::ModelHost;
use crate::{Result, ScoreError};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Environment variable holding an optional HuggingFace access token.
const HF_TOKEN_ENV: &str = "HF_TOKEN";

/// Client for HuggingFace Hub API operations.
pub struct HuggingFaceClient {
    http: Arc<HttpClient>,
    token: Option<String>,
    retry: RetryConfig,
}

impl HuggingFaceClient {
    /// Create a new client, picking up `HF_TOKEN` from the environment
    /// when present.
    pub fn new(http: Arc<HttpClient>) -> Self {
        let token = std::env::var(HF_TOKEN_ENV).ok().filter(|t| !t.is_empty());
        if token.is_some() {
            debug!("HuggingFace token found in environment");
        }
        Self {
            http,
            token,
            retry: RetryConfig::default(),
        }
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        match &self.token {
            Some(token) => vec![("Authorization".to_string(), format!("Bearer {}", token))],
            None => vec![],
        }
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let headers = self.auth_headers();
        let response = retry_async(
            &self.retry,
            || self.http.get_with_headers(url, &headers),
            |e: &ScoreError| e.is_retryable(),
        )
        .await?;
        check_hub_status(response, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        response.json().await.map_err(|e| ScoreError::Json {
            message: format!("Failed to parse HuggingFace response from {}: {}", url, e),
            source: None,
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| ScoreError::Network {
            message: format!("Failed to read body from {}: {}", url, e),
            cause: Some(e.to_string()),
        })
    }
}

/// Map a non-2xx hub response to a typed error.
fn check_hub_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ScoreError::NotFound {
            resource: url.to_string(),
        });
    }
    Err(ScoreError::HubApi {
        service: "HuggingFace".to_string(),
        message: format!("HuggingFace returned {} for {}", status, url),
        status_code: Some(status.as_u16()),
    })
}

#[async_trait]
impl ModelHost for HuggingFaceClient {
    async fn model_info(&self, repo_id: &str) -> Result<HfModelInfo> {
        // repo_id is "owner/model" -- the slash is part of the URL path,
        // so the whole string must not be percent-encoded.
        let url = format!("{}/models/{}", NetworkConfig::HF_API_BASE, repo_id);
        self.get_json(&url).await
    }

    async fn dataset_info(&self, repo_id: &str) -> Result<HfDatasetInfo> {
        let url = format!("{}/datasets/{}", NetworkConfig::HF_API_BASE, repo_id);
        self.get_json(&url).await
    }

    async fn raw_model_file(&self, repo_id: &str, filename: &str) -> Result<String> {
        let url = format!(
            "{}/{}/raw/main/{}",
            NetworkConfig::HF_HUB_BASE,
            repo_id,
            filename
        );
        self.get_text(&url).await
    }

    async fn raw_dataset_file(&self, repo_id: &str, filename: &str) -> Result<String> {
        let url = format!(
            "{}/datasets/{}/raw/main/{}",
            NetworkConfig::HF_HUB_BASE,
            repo_id,
            filename
        );
        self.get_text(&url).await
    }

    async fn file_size(&self, repo_id: &str, filename: &str) -> Result<Option<u64>> {
        let url = format!(
            "{}/{}/resolve/main/{}",
            NetworkConfig::HF_HUB_BASE,
            repo_id,
            filename
        );
        // HEAD only; the weight files themselves can be tens of GB.
        let response = self.http.head(&url).await?;
        let response = check_hub_status(response, &url)?;

        let size = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());
        Ok(size)
    }
}
