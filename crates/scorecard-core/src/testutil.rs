//! Stub hub hosts for unit tests.
//!
//! The stubs implement the `ModelHost`/`CodeHost` seams over in-memory
//! fixtures and count upstream calls so cache idempotency is verifiable.

use crate::fetcher::ArtifactFetcher;
use crate::locator::ResourceReference;
use crate::models::{
    CommitAuthor, CommitDetail, CommitEntry, CommitParent, Contributor, HfDatasetInfo,
    HfModelInfo, HfSibling, RepoInfo,
};
use crate::network::{CodeHost, ModelHost};
use crate::{Result, ScoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of upstream calls made through a stub.
#[derive(Clone)]
pub(crate) struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    fn new() -> Self {
        Self(Arc::new(AtomicUsize::new(0)))
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn missing(what: &str) -> ScoreError {
    ScoreError::NotFound {
        resource: what.to_string(),
    }
}

/// In-memory stand-in for the HuggingFace hub.
pub(crate) struct StubModelHost {
    model_info: HfModelInfo,
    dataset_info: HfDatasetInfo,
    model_files: HashMap<String, String>,
    dataset_files: HashMap<String, String>,
    file_sizes: HashMap<String, u64>,
    calls: CallCounter,
}

impl StubModelHost {
    pub(crate) fn new() -> Self {
        Self {
            model_info: HfModelInfo::default(),
            dataset_info: HfDatasetInfo::default(),
            model_files: HashMap::new(),
            dataset_files: HashMap::new(),
            file_sizes: HashMap::new(),
            calls: CallCounter::new(),
        }
    }

    pub(crate) fn with_model_file(mut self, name: &str, content: &str) -> Self {
        self.model_files.insert(name.to_string(), content.to_string());
        self
    }

    pub(crate) fn with_dataset_file(mut self, name: &str, content: &str) -> Self {
        self.dataset_files
            .insert(name.to_string(), content.to_string());
        self
    }

    pub(crate) fn with_sibling(mut self, name: &str, size: Option<u64>) -> Self {
        self.model_info.siblings.push(HfSibling {
            rfilename: name.to_string(),
            size,
        });
        self
    }

    pub(crate) fn with_file_size(mut self, name: &str, bytes: u64) -> Self {
        self.file_sizes.insert(name.to_string(), bytes);
        self
    }

    pub(crate) fn with_last_modified(mut self, timestamp: &str) -> Self {
        self.model_info.last_modified = Some(timestamp.to_string());
        self
    }

    pub(crate) fn with_downloads(mut self, downloads: u64) -> Self {
        self.dataset_info.downloads = Some(downloads);
        self
    }

    pub(crate) fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl ModelHost for StubModelHost {
    async fn model_info(&self, _repo_id: &str) -> Result<HfModelInfo> {
        self.calls.bump();
        Ok(self.model_info.clone())
    }

    async fn dataset_info(&self, _repo_id: &str) -> Result<HfDatasetInfo> {
        self.calls.bump();
        Ok(self.dataset_info.clone())
    }

    async fn raw_model_file(&self, _repo_id: &str, filename: &str) -> Result<String> {
        self.calls.bump();
        self.model_files
            .get(filename)
            .cloned()
            .ok_or_else(|| missing(filename))
    }

    async fn raw_dataset_file(&self, _repo_id: &str, filename: &str) -> Result<String> {
        self.calls.bump();
        self.dataset_files
            .get(filename)
            .cloned()
            .ok_or_else(|| missing(filename))
    }

    async fn file_size(&self, _repo_id: &str, filename: &str) -> Result<Option<u64>> {
        self.calls.bump();
        Ok(self.file_sizes.get(filename).copied())
    }
}

/// In-memory stand-in for GitHub.
pub(crate) struct StubCodeHost {
    repo_info: Option<RepoInfo>,
    contributors: Vec<Contributor>,
    commits: Vec<CommitEntry>,
    files: HashMap<String, String>,
    calls: CallCounter,
}

impl StubCodeHost {
    pub(crate) fn new() -> Self {
        Self {
            repo_info: None,
            contributors: Vec::new(),
            commits: Vec::new(),
            files: HashMap::new(),
            calls: CallCounter::new(),
        }
    }

    pub(crate) fn with_repo(mut self, stars: u64, forks: u64) -> Self {
        self.repo_info = Some(RepoInfo {
            stargazers_count: stars,
            forks_count: forks,
            pushed_at: None,
            default_branch: Some("main".to_string()),
        });
        self
    }

    pub(crate) fn with_contributors(mut self, count: usize) -> Self {
        self.contributors = (0..count)
            .map(|i| Contributor {
                login: format!("user{}", i),
                contributions: 10,
            })
            .collect();
        self
    }

    pub(crate) fn with_commit(mut self, message: &str, parent_count: usize) -> Self {
        self.commits.push(make_commit(message, parent_count, None));
        self
    }

    pub(crate) fn with_commits(mut self, commits: Vec<CommitEntry>) -> Self {
        self.commits = commits;
        self
    }

    pub(crate) fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub(crate) fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl CodeHost for StubCodeHost {
    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo> {
        self.calls.bump();
        self.repo_info
            .clone()
            .ok_or_else(|| missing(&format!("{}/{}", owner, repo)))
    }

    async fn contributors(&self, _owner: &str, _repo: &str) -> Result<Vec<Contributor>> {
        self.calls.bump();
        Ok(self.contributors.clone())
    }

    async fn recent_commits(&self, _owner: &str, _repo: &str) -> Result<Vec<CommitEntry>> {
        self.calls.bump();
        Ok(self.commits.clone())
    }

    async fn raw_file(&self, _owner: &str, _repo: &str, path: &str) -> Result<String> {
        self.calls.bump();
        self.files.get(path).cloned().ok_or_else(|| missing(path))
    }
}

/// Build a commit entry fixture.
pub(crate) fn make_commit(
    message: &str,
    parent_count: usize,
    date: Option<&str>,
) -> CommitEntry {
    CommitEntry {
        sha: format!("sha-{}", message.len()),
        commit: CommitDetail {
            message: message.to_string(),
            author: date.map(|d| CommitAuthor {
                date: Some(d.to_string()),
            }),
        },
        parents: (0..parent_count)
            .map(|i| CommitParent {
                sha: format!("parent-{}", i),
            })
            .collect(),
    }
}

/// Wire stubs into a fetcher.
pub(crate) fn fetcher_with(
    reference: ResourceReference,
    model: StubModelHost,
    code: StubCodeHost,
) -> ArtifactFetcher {
    ArtifactFetcher::new(reference, Arc::new(model), Arc::new(code))
}
