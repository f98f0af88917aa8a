//! Resource identifier parsing from raw artifact URLs.
//!
//! Turns the three caller-supplied URL strings into normalized identifiers:
//! a HuggingFace model id, a HuggingFace dataset id, and a GitHub owner/repo
//! pair. Parsing is pure string work with no I/O, and unrecognizable input
//! yields empty fields rather than an error.

/// Normalized identifiers derived once from the input URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceReference {
    /// HuggingFace model id ("org/name" or a bare name).
    pub model_id: Option<String>,
    /// HuggingFace dataset id.
    pub dataset_id: Option<String>,
    /// GitHub repository owner.
    pub code_owner: Option<String>,
    /// GitHub repository name.
    pub code_repo: Option<String>,
}

impl ResourceReference {
    /// Parse three possibly-empty URL strings. Never fails.
    pub fn from_urls(model_url: &str, dataset_url: &str, code_url: &str) -> Self {
        let (code_owner, code_repo) = parse_github_url(code_url);
        Self {
            model_id: parse_hf_model_id(model_url),
            dataset_id: parse_hf_dataset_id(dataset_url),
            code_owner,
            code_repo,
        }
    }

    /// Short display name for the model: the last `/`-separated segment of
    /// the model id.
    pub fn model_name(&self) -> String {
        self.model_id
            .as_deref()
            .and_then(|id| id.rsplit('/').next())
            .unwrap_or_default()
            .to_string()
    }

    /// Whether a code repository was resolved.
    pub fn has_code(&self) -> bool {
        self.code_owner.is_some() && self.code_repo.is_some()
    }

    /// Whether a dataset was resolved.
    pub fn has_dataset(&self) -> bool {
        self.dataset_id.is_some()
    }
}

/// Extract a model id from a HuggingFace model URL.
///
/// Dataset URLs are rejected here; they resolve through
/// [`parse_hf_dataset_id`] instead.
fn parse_hf_model_id(url: &str) -> Option<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() || url.contains("/datasets/") {
        return None;
    }

    let rest = url.split_once("huggingface.co/")?.1;
    let id = rest.trim_end_matches("/tree/main").trim_end_matches('/');
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Extract a dataset id from a HuggingFace dataset URL.
fn parse_hf_dataset_id(url: &str) -> Option<String> {
    let url = url.trim().trim_end_matches('/');
    let rest = url.split_once("huggingface.co/datasets/")?.1;
    let id = rest.trim_end_matches("/tree/main").trim_end_matches('/');
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Extract an owner/repo pair from a GitHub URL.
///
/// A valid URL splits into at least five `/`-segments
/// (scheme, empty, host, owner, repo); anything shorter yields neither.
fn parse_github_url(url: &str) -> (Option<String>, Option<String>) {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return (None, None);
    }

    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 5 {
        return (None, None);
    }

    let owner = segments[3];
    let repo = segments[4];
    if owner.is_empty() || repo.is_empty() {
        return (None, None);
    }

    (Some(owner.to_string()), Some(repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_url() {
        let r = ResourceReference::from_urls("https://huggingface.co/bert-base-uncased", "", "");
        assert_eq!(r.model_id.as_deref(), Some("bert-base-uncased"));
        assert_eq!(r.model_name(), "bert-base-uncased");
        assert!(r.dataset_id.is_none());
    }

    #[test]
    fn test_model_url_with_org_and_tree() {
        let r = ResourceReference::from_urls(
            "https://huggingface.co/google/flan-t5-base/tree/main",
            "",
            "",
        );
        assert_eq!(r.model_id.as_deref(), Some("google/flan-t5-base"));
        assert_eq!(r.model_name(), "flan-t5-base");
    }

    #[test]
    fn test_model_url_trailing_slash() {
        let r = ResourceReference::from_urls("https://huggingface.co/org/model/", "", "");
        assert_eq!(r.model_id.as_deref(), Some("org/model"));
    }

    #[test]
    fn test_dataset_url() {
        let r =
            ResourceReference::from_urls("", "https://huggingface.co/datasets/squad", "");
        assert_eq!(r.dataset_id.as_deref(), Some("squad"));
        assert!(r.has_dataset());
        assert!(r.model_id.is_none());
    }

    #[test]
    fn test_dataset_url_not_parsed_as_model() {
        let r = ResourceReference::from_urls(
            "https://huggingface.co/datasets/squad",
            "",
            "",
        );
        assert!(r.model_id.is_none());
    }

    #[test]
    fn test_github_url() {
        let r = ResourceReference::from_urls(
            "",
            "",
            "https://github.com/huggingface/transformers",
        );
        assert_eq!(r.code_owner.as_deref(), Some("huggingface"));
        assert_eq!(r.code_repo.as_deref(), Some("transformers"));
        assert!(r.has_code());
    }

    #[test]
    fn test_github_url_too_short() {
        let r = ResourceReference::from_urls("", "", "https://github.com/huggingface");
        assert!(r.code_owner.is_none());
        assert!(r.code_repo.is_none());
        assert!(!r.has_code());
    }

    #[test]
    fn test_all_empty_is_not_an_error() {
        let r = ResourceReference::from_urls("", "", "");
        assert_eq!(r, ResourceReference::default());
        assert_eq!(r.model_name(), "");
    }

    #[test]
    fn test_garbage_input() {
        let r = ResourceReference::from_urls("not a url", "also not", "nope");
        assert_eq!(r, ResourceReference::default());
    }
}
