//! Centralized configuration for the scoring engine.
//!
//! Network constants follow the upstream services' documented limits; scoring
//! constants (metric weights, platform size thresholds) are the registry's
//! Phase-2 policy values.

use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    pub const MAX_RETRIES: u32 = 2;
    pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
    pub const USER_AGENT: &'static str = "Scorecard/0.3";

    pub const HF_API_BASE: &'static str = "https://huggingface.co/api";
    pub const HF_HUB_BASE: &'static str = "https://huggingface.co";
    pub const GITHUB_API_BASE: &'static str = "https://api.github.com";
    pub const GITHUB_RAW_BASE: &'static str = "https://raw.githubusercontent.com";

    pub const GITHUB_CONTRIBUTORS_PER_PAGE: u32 = 100;
    pub const GITHUB_COMMITS_PER_PAGE: u32 = 100;
}

/// Scoring policy configuration.
pub struct ScoringConfig;

impl ScoringConfig {
    /// Concurrent scorer slots. Bounds outbound connections, not CPU.
    pub const EVAL_CONCURRENCY: usize = 4;

    /// Days within which a modification counts as "recent" for code quality.
    pub const CODE_RECENCY_DAYS: i64 = 180;

    /// Deployment platform size thresholds in GB. A model at or above the
    /// threshold scores 0.0 for that platform.
    pub const PLATFORM_THRESHOLDS_GB: [(&'static str, f64); 4] = [
        ("raspberry_pi", 0.5),
        ("jetson_nano", 1.0),
        ("desktop_pc", 6.0),
        ("aws_server", 15.0),
    ];
}

/// Fixed net-score weights (Phase 2). Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub license: f64,
    pub code_quality: f64,
    pub dataset_quality: f64,
    pub reproducibility: f64,
    pub ramp_up: f64,
    pub bus_factor: f64,
    pub reviewedness: f64,
    pub dataset_and_code: f64,
    pub size: f64,
    pub performance_claims: f64,
    pub treescore: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            license: 0.15,
            code_quality: 0.11,
            dataset_quality: 0.11,
            reproducibility: 0.10,
            ramp_up: 0.09,
            bus_factor: 0.09,
            reviewedness: 0.09,
            dataset_and_code: 0.09,
            size: 0.07,
            performance_claims: 0.07,
            treescore: 0.03,
        }
    }
}

impl Weights {
    /// Sum of all eleven weights.
    pub fn total(&self) -> f64 {
        self.license
            + self.code_quality
            + self.dataset_quality
            + self.reproducibility
            + self.ramp_up
            + self.bus_factor
            + self.reviewedness
            + self.dataset_and_code
            + self.size
            + self.performance_claims
            + self.treescore
    }
}

/// Configuration for the optional LLM analysis endpoint.
///
/// All fields come from the environment. Missing credentials disable the
/// LLM path entirely; the heuristic scorers run instead.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat-completions base URL (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Sampling temperature. Kept low for deterministic-leaning judgments.
    pub temperature: f64,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Nucleus sampling parameter.
    pub top_p: f64,
}

impl LlmConfig {
    pub const API_KEY_ENV: &'static str = "SCORECARD_LLM_API_KEY";
    pub const BASE_URL_ENV: &'static str = "SCORECARD_LLM_BASE_URL";
    pub const MODEL_ENV: &'static str = "SCORECARD_LLM_MODEL";

    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    const DEFAULT_TEMPERATURE: f64 = 0.1;
    const DEFAULT_MAX_TOKENS: u32 = 64;
    const DEFAULT_TOP_P: f64 = 1.0;

    /// Build a config from the environment, or `None` if no API key is set.
    ///
    /// Absence of credentials is not an error: the caller falls back to the
    /// heuristic analysis paths.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV).ok().filter(|k| !k.is_empty())?;
        let base_url = std::env::var(Self::BASE_URL_ENV)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        let model = std::env::var(Self::MODEL_ENV)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());

        Some(Self {
            base_url,
            api_key,
            model,
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            top_p: Self::DEFAULT_TOP_P,
        })
    }
}
