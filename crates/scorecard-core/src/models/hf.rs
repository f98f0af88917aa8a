//! HuggingFace Hub API response types.

use serde::Deserialize;

/// Model metadata from `GET /api/models/{repo_id}`.
///
/// Fetched once per evaluation and cached, so every scorer sees the same
/// snapshot. Only the fields the scorers consume are extracted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HfModelInfo {
    /// Requires full=true in search; always present in the direct endpoint
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Parsed model card frontmatter as returned by the Hub
    #[serde(default, rename = "cardData")]
    pub card_data: Option<serde_json::Value>,
    /// File list from the repo
    #[serde(default)]
    pub siblings: Vec<HfSibling>,
}

/// Sibling file entry from the model info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HfSibling {
    /// Relative filename in the repo
    pub rfilename: String,
    /// Size in bytes when the API provides it; weight files usually need a
    /// HEAD request instead
    #[serde(default)]
    pub size: Option<u64>,
}

/// Dataset metadata from `GET /api/datasets/{repo_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HfDatasetInfo {
    #[serde(default)]
    pub downloads: Option<u64>,
    #[serde(default, rename = "cardData")]
    pub card_data: Option<serde_json::Value>,
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<String>,
}
