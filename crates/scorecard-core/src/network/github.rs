//! GitHub REST API v3 client.
//!
//! Provides the repository-level lookups the scorers need: repo info
//! (stars/forks), contributors, recent commits, and raw file content.
//! An optional `GITHUB_TOKEN` from the environment raises the rate limit
//! from 60 to 5000 requests per hour.

use crate::config::NetworkConfig;
use crate::models::{CommitEntry, Contributor, RepoInfo};
use crate::network::client::HttpClient;
use crate::network::retry::{retry_async, RetryConfig};
use crate::network::CodeHost;
use crate::{Result, ScoreError};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Environment variable holding an optional GitHub access token.
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Client for GitHub REST API operations.
pub struct GitHubClient {
    http: Arc<HttpClient>,
    token: Option<String>,
    retry: RetryConfig,
}

impl GitHubClient {
    /// Create a new client, picking up `GITHUB_TOKEN` from the environment
    /// when present.
    pub fn new(http: Arc<HttpClient>) -> Self {
        let token = std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty());
        if token.is_some() {
            debug!("GitHub token found in environment");
        }
        Self {
            http,
            token,
            retry: RetryConfig::default(),
        }
    }

    fn api_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Accept".to_string(),
            "application/vnd.github.v3+json".to_string(),
        )];
        if let Some(ref token) = self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        headers
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let headers = self.api_headers();
        let response = retry_async(
            &self.retry,
            || self.http.get_with_headers(url, &headers),
            |e: &ScoreError| e.is_retryable(),
        )
        .await?;
        check_github_status(response, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        response.json().await.map_err(|e| ScoreError::Json {
            message: format!("Failed to parse GitHub response from {}: {}", url, e),
            source: None,
        })
    }
}

/// Map a non-2xx GitHub response to a typed error.
fn check_github_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ScoreError::NotFound {
            resource: url.to_string(),
        });
    }
    if status == StatusCode::FORBIDDEN {
        // Unauthenticated rate limit exhaustion surfaces as 403
        return Err(ScoreError::RateLimited {
            service: "GitHub".to_string(),
            retry_after_secs: None,
        });
    }
    Err(ScoreError::HubApi {
        service: "GitHub".to_string(),
        message: format!("GitHub returned {} for {}", status, url),
        status_code: Some(status.as_u16()),
    })
}

#[async_trait]
impl CodeHost for GitHubClient {
    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo> {
        let url = format!("{}/repos/{}/{}", NetworkConfig::GITHUB_API_BASE, owner, repo);
        self.get_json(&url).await
    }

    async fn contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>> {
        let url = format!(
            "{}/repos/{}/{}/contributors?per_page={}",
            NetworkConfig::GITHUB_API_BASE,
            owner,
            repo,
            NetworkConfig::GITHUB_CONTRIBUTORS_PER_PAGE
        );
        self.get_json(&url).await
    }

    async fn recent_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitEntry>> {
        let url = format!(
            "{}/repos/{}/{}/commits?per_page={}",
            NetworkConfig::GITHUB_API_BASE,
            owner,
            repo,
            NetworkConfig::GITHUB_COMMITS_PER_PAGE
        );
        self.get_json(&url).await
    }

    async fn raw_file(&self, owner: &str, repo: &str, path: &str) -> Result<String> {
        // Try `main` first; older repositories still serve from `master`.
        for branch in ["main", "master"] {
            let url = format!(
                "{}/{}/{}/{}/{}",
                NetworkConfig::GITHUB_RAW_BASE,
                owner,
                repo,
                branch,
                path
            );
            match self.http.get(&url).await {
                Ok(response) if response.status().is_success() => {
                    return response.text().await.map_err(|e| ScoreError::Network {
                        message: format!("Failed to read body from {}: {}", url, e),
                        cause: Some(e.to_string()),
                    });
                }
                Ok(response) => {
                    debug!(
                        "Raw fetch {} returned {}, trying next branch",
                        url,
                        response.status()
                    );
                }
                Err(e) => {
                    warn!("Raw fetch {} failed: {}", url, e);
                }
            }
        }
        Err(ScoreError::NotFound {
            resource: format!("{}/{}/{}", owner, repo, path),
        })
    }
}
