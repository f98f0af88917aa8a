//! Network layer: HTTP plumbing and upstream hub clients.
//!
//! The two hubs sit behind async traits so the fetcher is wired by explicit
//! dependency injection and tests can stub the network entirely.

pub mod client;
pub mod github;
pub mod hf;
pub mod retry;

pub use client::HttpClient;
pub use github::GitHubClient;
pub use hf::HuggingFaceClient;

use crate::models::{CommitEntry, Contributor, HfDatasetInfo, HfModelInfo, RepoInfo};
use crate::Result;
use async_trait::async_trait;

/// Operations against the model/dataset hub (HuggingFace).
#[async_trait]
pub trait ModelHost: Send + Sync {
    /// Model metadata from the models API.
    async fn model_info(&self, repo_id: &str) -> Result<HfModelInfo>;

    /// Dataset metadata from the datasets API.
    async fn dataset_info(&self, repo_id: &str) -> Result<HfDatasetInfo>;

    /// Raw file content from a model repository's main branch.
    async fn raw_model_file(&self, repo_id: &str, filename: &str) -> Result<String>;

    /// Raw file content from a dataset repository's main branch.
    async fn raw_dataset_file(&self, repo_id: &str, filename: &str) -> Result<String>;

    /// Size in bytes of a file in a model repository, if the host reports it.
    async fn file_size(&self, repo_id: &str, filename: &str) -> Result<Option<u64>>;
}

/// Operations against the code host (GitHub REST v3).
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Repository info (stars, forks, default branch).
    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo>;

    /// Contributor list, one page of up to 100.
    async fn contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>>;

    /// Most recent commits, one page of up to 100.
    async fn recent_commits(&self, owner: &str, repo: &str) -> Result<Vec<CommitEntry>>;

    /// Raw file content from the repository's default branch.
    async fn raw_file(&self, owner: &str, repo: &str, path: &str) -> Result<String>;
}
