//! Request-scoped memoization cache for derived fetch results.
//!
//! One cache belongs to exactly one [`ArtifactFetcher`](super::ArtifactFetcher)
//! and dies with it; nothing is shared across evaluations. Values are the
//! already-derived results keyed by semantic name (`"license"`,
//! `"readme_code"`, ...), never raw HTTP responses.
//!
//! Population is check-then-set without a lock across the fetch: two scorers
//! racing on the same key may both miss and both fetch, and the last write
//! wins. The fetched value is idempotent within one evaluation, so the race
//! is benign and cheaper than serializing all fetches.

use crate::models::{CommitEntry, GithubStats, HfDatasetInfo, HfModelInfo};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A derived value stored under a semantic key.
#[derive(Debug, Clone)]
pub(crate) enum CacheValue {
    Text(String),
    Float(f64),
    Uint(u64),
    Flag(bool),
    Stats(GithubStats),
    List(Vec<String>),
    Model(HfModelInfo),
    Dataset(HfDatasetInfo),
    Commits(Vec<CommitEntry>),
}

impl CacheValue {
    pub(crate) fn as_text(&self) -> Option<String> {
        match self {
            CacheValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub(crate) fn as_float(&self) -> Option<f64> {
        match self {
            CacheValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_uint(&self) -> Option<u64> {
        match self {
            CacheValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_flag(&self) -> Option<bool> {
        match self {
            CacheValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_stats(&self) -> Option<GithubStats> {
        match self {
            CacheValue::Stats(v) => Some(*v),
            _ => None,
        }
    }

    pub(crate) fn as_list(&self) -> Option<Vec<String>> {
        match self {
            CacheValue::List(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub(crate) fn as_model(&self) -> Option<HfModelInfo> {
        match self {
            CacheValue::Model(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub(crate) fn as_dataset(&self) -> Option<HfDatasetInfo> {
        match self {
            CacheValue::Dataset(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub(crate) fn as_commits(&self) -> Option<Vec<CommitEntry>> {
        match self {
            CacheValue::Commits(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Key-value store scoped to a single evaluation.
#[derive(Debug, Default)]
pub(crate) struct FetchCache {
    entries: RwLock<HashMap<String, CacheValue>>,
}

impl FetchCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn get(&self, key: &str) -> Option<CacheValue> {
        self.entries.read().await.get(key).cloned()
    }

    pub(crate) async fn insert(&self, key: impl Into<String>, value: CacheValue) {
        self.entries.write().await.insert(key.into(), value);
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
