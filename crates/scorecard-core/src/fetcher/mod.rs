//! Data fetcher facade over the two hub clients.
//!
//! One [`ArtifactFetcher`] lives for exactly one evaluation. Every accessor
//! is memoized in a request-scoped cache and degrades to a documented safe
//! default on any upstream failure -- nothing in this module returns an
//! error to its callers. Accessors with more than one data source model the
//! fallback chain as an ordered list of strategies, each yielding an
//! `Option`, with the first hit winning.

mod cache;
pub(crate) mod text;

use crate::locator::ResourceReference;
use crate::models::{CommitEntry, GithubStats, HfDatasetInfo, HfModelInfo};
use crate::network::{CodeHost, ModelHost};
use cache::{CacheValue, FetchCache};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which artifact a README (or recency check) refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Dataset,
    Code,
}

impl ArtifactKind {
    fn key(&self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Dataset => "dataset",
            ArtifactKind::Code => "code",
        }
    }
}

/// `config.json` fields that may point at a parent model.
const LINEAGE_KEYS: [&str; 5] = [
    "_name_or_path",
    "base_model",
    "parent_model",
    "pretrained_model_name_or_path",
    "model_name_or_path",
];

/// Bare model names (no org prefix) that are recognizable hub models.
const KNOWN_BASE_PREFIXES: [&str; 8] = [
    "bert", "gpt", "t5", "roberta", "distilbert", "albert", "bart", "llama",
];

/// Weight file extensions counted toward the model size.
const WEIGHT_EXTENSIONS: [&str; 2] = [".bin", ".safetensors"];

/// Facade wrapping the resource reference, the hub clients, and the
/// request-scoped cache.
pub struct ArtifactFetcher {
    reference: ResourceReference,
    model_host: Arc<dyn ModelHost>,
    code_host: Arc<dyn CodeHost>,
    cache: FetchCache,
}

impl ArtifactFetcher {
    /// Build a fetcher for one evaluation. The hosts are injected so tests
    /// (and alternative hub deployments) can substitute their own.
    pub fn new(
        reference: ResourceReference,
        model_host: Arc<dyn ModelHost>,
        code_host: Arc<dyn CodeHost>,
    ) -> Self {
        Self {
            reference,
            model_host,
            code_host,
            cache: FetchCache::new(),
        }
    }

    /// The resolved identifiers this fetcher operates on.
    pub fn reference(&self) -> &ResourceReference {
        &self.reference
    }

    /// Whether a code repository URL was resolved.
    pub fn has_code_url(&self) -> bool {
        self.reference.has_code()
    }

    /// Whether a dataset URL was resolved.
    pub fn has_dataset_url(&self) -> bool {
        self.reference.has_dataset()
    }

    /// Resolved license identifier, or `"Unknown"`.
    ///
    /// Chain: model card YAML frontmatter -> `## License` heading body ->
    /// repository `LICENSE` file keyword match.
    pub async fn license(&self) -> String {
        if let Some(hit) = self.cache.get("license").await.and_then(|v| v.as_text()) {
            return hit;
        }

        let readme = self.raw_model_readme().await;
        let resolved = text::frontmatter_value(&readme, "license");
        let resolved = match resolved {
            Some(v) => Some(v),
            None => text::line_after_heading(&readme, "license"),
        };
        let resolved = match resolved {
            Some(v) => Some(v),
            None => self.license_from_code_repo().await,
        };

        let value = resolved.unwrap_or_else(|| "Unknown".to_string());
        self.cache
            .insert("license", CacheValue::Text(value.clone()))
            .await;
        value
    }

    /// Total size of the model's weight files in GB, or `0.0`.
    ///
    /// Sums sibling sizes for `.bin`/`.safetensors` files, falling back to a
    /// HEAD request per file when the metadata omits the size.
    pub async fn model_size_gb(&self) -> f64 {
        if let Some(hit) = self
            .cache
            .get("model_size_gb")
            .await
            .and_then(|v| v.as_float())
        {
            return hit;
        }

        let mut total_bytes: u64 = 0;
        if let Some(id) = self.reference.model_id.clone() {
            let info = self.model_info().await;
            for sibling in &info.siblings {
                let name = sibling.rfilename.as_str();
                if !WEIGHT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                    continue;
                }
                match sibling.size {
                    Some(size) => total_bytes += size,
                    None => match self.model_host.file_size(&id, name).await {
                        Ok(Some(size)) => total_bytes += size,
                        Ok(None) => debug!("No content-length for {}/{}", id, name),
                        Err(e) => warn!("Size lookup failed for {}/{}: {}", id, name, e),
                    },
                }
            }
        }

        let gb = total_bytes as f64 / 1e9;
        self.cache
            .insert("model_size_gb", CacheValue::Float(gb))
            .await;
        gb
    }

    /// Cleaned README text for the given artifact, or `""`.
    ///
    /// Model and dataset READMEs come from the hub's raw endpoint with the
    /// structured card data as fallback; the code README comes from the
    /// repository's default branch. Content is HTML-stripped then
    /// Markdown-stripped before return.
    pub async fn readme(&self, kind: ArtifactKind) -> String {
        let cache_key = format!("readme_{}", kind.key());
        if let Some(hit) = self.cache.get(&cache_key).await.and_then(|v| v.as_text()) {
            return hit;
        }

        let raw = match kind {
            ArtifactKind::Model => {
                let raw = self.raw_model_readme().await;
                if raw.is_empty() {
                    self.model_info()
                        .await
                        .card_data
                        .map(|card| card.to_string())
                        .unwrap_or_default()
                } else {
                    raw
                }
            }
            ArtifactKind::Dataset => {
                let raw = self.raw_dataset_readme().await;
                if raw.is_empty() {
                    self.dataset_info()
                        .await
                        .card_data
                        .map(|card| card.to_string())
                        .unwrap_or_default()
                } else {
                    raw
                }
            }
            ArtifactKind::Code => self.raw_code_readme().await,
        };

        let cleaned = text::clean_readme(&raw);
        self.cache
            .insert(cache_key, CacheValue::Text(cleaned.clone()))
            .await;
        cleaned
    }

    /// Star and fork counts for the linked repository, or zeros.
    pub async fn github_stats(&self) -> GithubStats {
        if let Some(hit) = self
            .cache
            .get("github_stats")
            .await
            .and_then(|v| v.as_stats())
        {
            return hit;
        }

        let stats = match (&self.reference.code_owner, &self.reference.code_repo) {
            (Some(owner), Some(repo)) => match self.code_host.repo_info(owner, repo).await {
                Ok(info) => info.stats(),
                Err(e) => {
                    warn!("Repo info fetch failed for {}/{}: {}", owner, repo, e);
                    GithubStats::default()
                }
            },
            _ => GithubStats::default(),
        };

        self.cache
            .insert("github_stats", CacheValue::Stats(stats))
            .await;
        stats
    }

    /// Contributor count for the linked repository, or `0`.
    pub async fn contributor_count(&self) -> u64 {
        if let Some(hit) = self
            .cache
            .get("contributor_count")
            .await
            .and_then(|v| v.as_uint())
        {
            return hit;
        }

        let count = match (&self.reference.code_owner, &self.reference.code_repo) {
            (Some(owner), Some(repo)) => match self.code_host.contributors(owner, repo).await {
                Ok(contributors) => contributors.len() as u64,
                Err(e) => {
                    warn!("Contributors fetch failed for {}/{}: {}", owner, repo, e);
                    0
                }
            },
            _ => 0,
        };

        self.cache
            .insert("contributor_count", CacheValue::Uint(count))
            .await;
        count
    }

    /// Download count for the linked dataset, or `0`.
    pub async fn dataset_downloads(&self) -> u64 {
        if let Some(hit) = self
            .cache
            .get("dataset_downloads")
            .await
            .and_then(|v| v.as_uint())
        {
            return hit;
        }

        let downloads = self.dataset_info().await.downloads.unwrap_or(0);
        self.cache
            .insert("dataset_downloads", CacheValue::Uint(downloads))
            .await;
        downloads
    }

    /// Up to 100 most recent commits on the linked repository.
    pub async fn recent_commits(&self) -> Vec<CommitEntry> {
        if let Some(hit) = self
            .cache
            .get("recent_commits")
            .await
            .and_then(|v| v.as_commits())
        {
            return hit;
        }

        let commits = match (&self.reference.code_owner, &self.reference.code_repo) {
            (Some(owner), Some(repo)) => {
                match self.code_host.recent_commits(owner, repo).await {
                    Ok(commits) => commits,
                    Err(e) => {
                        warn!("Commit fetch failed for {}/{}: {}", owner, repo, e);
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };

        self.cache
            .insert("recent_commits", CacheValue::Commits(commits.clone()))
            .await;
        commits
    }

    /// Whether the artifact was modified within the last `days` days.
    ///
    /// The model and dataset use the hub's `lastModified` timestamp; the
    /// code repository uses its most recent commit date.
    pub async fn recently_modified(&self, kind: ArtifactKind, days: i64) -> bool {
        let cache_key = format!("recent_{}_{}", kind.key(), days);
        if let Some(hit) = self.cache.get(&cache_key).await.and_then(|v| v.as_flag()) {
            return hit;
        }

        let timestamp = match kind {
            ArtifactKind::Model => self.model_info().await.last_modified,
            ArtifactKind::Dataset => self.dataset_info().await.last_modified,
            ArtifactKind::Code => self
                .recent_commits()
                .await
                .first()
                .and_then(|c| c.commit.author.as_ref())
                .and_then(|a| a.date.clone()),
        };

        let recent = timestamp
            .as_deref()
            .map(|ts| within_days(ts, days))
            .unwrap_or(false);

        self.cache.insert(cache_key, CacheValue::Flag(recent)).await;
        recent
    }

    /// Candidate parent model ids from the model's `config.json`, or `[]`.
    ///
    /// Scans the lineage-bearing fields for slash-qualified ids or bare
    /// names with a recognizable hub prefix.
    pub async fn parent_model_ids(&self) -> Vec<String> {
        if let Some(hit) = self
            .cache
            .get("parent_models")
            .await
            .and_then(|v| v.as_list())
        {
            return hit;
        }

        let mut parents = Vec::new();
        if let Some(id) = &self.reference.model_id {
            match self.model_host.raw_model_file(id, "config.json").await {
                Ok(content) => match serde_json::from_str::<serde_json::Value>(&content) {
                    Ok(config) => {
                        for key in LINEAGE_KEYS {
                            let Some(value) = config.get(key).and_then(|v| v.as_str()) else {
                                continue;
                            };
                            if looks_like_model_id(value) && !parents.iter().any(|p| p == value) {
                                parents.push(value.to_string());
                            }
                        }
                    }
                    Err(e) => debug!("config.json for {} is not valid JSON: {}", id, e),
                },
                Err(e) => debug!("config.json fetch failed for {}: {}", id, e),
            }
        }

        self.cache
            .insert("parent_models", CacheValue::List(parents.clone()))
            .await;
        parents
    }

    // Internal single-source fetches

    /// Model metadata snapshot. Fetched once; a failed fetch caches the
    /// empty default so every scorer sees the same snapshot.
    pub(crate) async fn model_info(&self) -> HfModelInfo {
        if let Some(hit) = self.cache.get("model_info").await.and_then(|v| v.as_model()) {
            return hit;
        }

        let info = match &self.reference.model_id {
            Some(id) => match self.model_host.model_info(id).await {
                Ok(info) => info,
                Err(e) => {
                    warn!("Model info fetch failed for {}: {}", id, e);
                    HfModelInfo::default()
                }
            },
            None => HfModelInfo::default(),
        };

        self.cache
            .insert("model_info", CacheValue::Model(info.clone()))
            .await;
        info
    }

    async fn dataset_info(&self) -> HfDatasetInfo {
        if let Some(hit) = self
            .cache
            .get("dataset_info")
            .await
            .and_then(|v| v.as_dataset())
        {
            return hit;
        }

        let info = match &self.reference.dataset_id {
            Some(id) => match self.model_host.dataset_info(id).await {
                Ok(info) => info,
                Err(e) => {
                    warn!("Dataset info fetch failed for {}: {}", id, e);
                    HfDatasetInfo::default()
                }
            },
            None => HfDatasetInfo::default(),
        };

        self.cache
            .insert("dataset_info", CacheValue::Dataset(info.clone()))
            .await;
        info
    }

    /// Raw (unstripped) model README. The license chain reads frontmatter
    /// from it, so the raw text is cached separately from the cleaned one.
    async fn raw_model_readme(&self) -> String {
        if let Some(hit) = self
            .cache
            .get("raw_readme_model")
            .await
            .and_then(|v| v.as_text())
        {
            return hit;
        }

        let raw = match &self.reference.model_id {
            Some(id) => match self.model_host.raw_model_file(id, "README.md").await {
                Ok(content) => content,
                Err(e) => {
                    debug!("Model README fetch failed for {}: {}", id, e);
                    String::new()
                }
            },
            None => String::new(),
        };

        self.cache
            .insert("raw_readme_model", CacheValue::Text(raw.clone()))
            .await;
        raw
    }

    async fn raw_dataset_readme(&self) -> String {
        let raw = match &self.reference.dataset_id {
            Some(id) => match self.model_host.raw_dataset_file(id, "README.md").await {
                Ok(content) => content,
                Err(e) => {
                    debug!("Dataset README fetch failed for {}: {}", id, e);
                    String::new()
                }
            },
            None => String::new(),
        };
        raw
    }

    async fn raw_code_readme(&self) -> String {
        match (&self.reference.code_owner, &self.reference.code_repo) {
            (Some(owner), Some(repo)) => {
                match self.code_host.raw_file(owner, repo, "README.md").await {
                    Ok(content) => content,
                    Err(e) => {
                        debug!("Code README fetch failed for {}/{}: {}", owner, repo, e);
                        String::new()
                    }
                }
            }
            _ => String::new(),
        }
    }

    /// Last strategy of the license chain: keyword-match the repository's
    /// `LICENSE` file.
    async fn license_from_code_repo(&self) -> Option<String> {
        let (owner, repo) = match (&self.reference.code_owner, &self.reference.code_repo) {
            (Some(owner), Some(repo)) => (owner, repo),
            _ => return None,
        };

        match self.code_host.raw_file(owner, repo, "LICENSE").await {
            Ok(content) => detect_license_keyword(&content),
            Err(e) => {
                debug!("LICENSE fetch failed for {}/{}: {}", owner, repo, e);
                None
            }
        }
    }
}

/// Match the body of a LICENSE file against the common license families.
fn detect_license_keyword(content: &str) -> Option<String> {
    let lowered = content.to_lowercase();
    if lowered.contains("mit license") || lowered.starts_with("mit") {
        return Some("MIT".to_string());
    }
    if lowered.contains("apache license") {
        return Some("Apache-2.0".to_string());
    }
    if lowered.contains("gnu general public license") {
        if lowered.contains("version 3") || lowered.contains("v3") {
            return Some("GPL-3.0".to_string());
        }
        return Some("GPL-2.0".to_string());
    }
    if lowered.contains("bsd") {
        return Some("BSD".to_string());
    }
    None
}

/// Whether a config value plausibly names another hub model.
fn looks_like_model_id(value: &str) -> bool {
    if value.contains('/') {
        // Local filesystem paths also contain slashes; rule the obvious
        // ones out.
        return !value.starts_with('/') && !value.starts_with("./") && !value.starts_with("..");
    }
    KNOWN_BASE_PREFIXES
        .iter()
        .any(|prefix| value.to_lowercase().starts_with(prefix))
}

/// Whether an RFC-3339 timestamp falls within the last `days` days.
fn within_days(timestamp: &str, days: i64) -> bool {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => {
            let age = Utc::now().signed_duration_since(parsed.with_timezone(&Utc));
            age.num_days() <= days
        }
        Err(e) => {
            debug!("Unparseable timestamp {:?}: {}", timestamp, e);
            false
        }
    }
}
