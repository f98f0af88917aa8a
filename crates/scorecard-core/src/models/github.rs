//! GitHub REST API response types.

use serde::Deserialize;

/// Star/fork counts as consumed by the scorers.
///
/// This is the narrow internal shape; [`RepoInfo`] is the raw API response
/// it is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GithubStats {
    pub stars: u64,
    pub forks: u64,
}

/// Repository info from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoInfo {
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl RepoInfo {
    pub fn stats(&self) -> GithubStats {
        GithubStats {
            stars: self.stargazers_count,
            forks: self.forks_count,
        }
    }
}

/// Contributor entry from `GET /repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

/// Commit entry from `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitEntry {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub commit: CommitDetail,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
}

/// Nested commit detail (message + author date).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

/// Commit author signature.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub date: Option<String>,
}

/// Parent reference on a commit. More than one parent means a merge commit.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitParent {
    #[serde(default)]
    pub sha: String,
}

impl CommitEntry {
    /// A commit counts as reviewed if it is a merge commit or its message
    /// indicates a merged pull request.
    pub fn is_reviewed(&self) -> bool {
        if self.parents.len() > 1 {
            return true;
        }
        let message = self.commit.message.to_lowercase();
        message.contains("merge pull request") || message.contains("merge pr")
    }
}
