//! Ramp-up time scorer.
//!
//! Estimates how quickly a newcomer could get started from the code
//! repository's README. When an LLM analyzer is configured its judgment is
//! used directly; otherwise a keyword heuristic measures how much substance
//! each onboarding section carries.

use crate::analysis::ReadmeAnalyzer;
use crate::fetcher::{ArtifactFetcher, ArtifactKind};
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Section topics that indicate onboarding documentation.
const SECTION_KEYWORDS: [&str; 8] = [
    "install",
    "installation",
    "usage",
    "example",
    "quickstart",
    "quick start",
    "download",
    "how to use",
];

/// Words that pad a section without informing anyone.
const FILLER_WORDS: [&str; 4] = ["more", "information", "see", "docs"];

/// A section with this many meaningful words earns full credit.
const TARGET_WORDS_PER_SECTION: f64 = 50.0;

pub struct RampUp {
    analyzer: Option<Arc<dyn ReadmeAnalyzer>>,
}

impl RampUp {
    pub fn new(analyzer: Option<Arc<dyn ReadmeAnalyzer>>) -> Self {
        Self { analyzer }
    }
}

/// Average onboarding-section substance across all section keywords.
///
/// For each keyword present, meaningful words are counted up to the next
/// section keyword occurrence and normalized against the 50-word target;
/// an absent section contributes zero.
pub(crate) fn heuristic_score(readme: &str) -> f64 {
    if readme.trim().is_empty() {
        return 0.0;
    }

    let lowered = readme.to_lowercase();
    let mut total = 0.0;

    for keyword in SECTION_KEYWORDS {
        let Some(pos) = lowered.find(keyword) else {
            continue;
        };
        let section = &lowered[pos + keyword.len()..];
        let end = SECTION_KEYWORDS
            .iter()
            .filter_map(|k| section.find(k))
            .min()
            .unwrap_or(section.len());

        let meaningful = section[..end]
            .split_whitespace()
            .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
            .filter(|w| {
                let bare = w.trim_matches(|c: char| !c.is_alphanumeric());
                !FILLER_WORDS.contains(&bare)
            })
            .count();

        total += (meaningful as f64 / TARGET_WORDS_PER_SECTION).min(1.0);
    }

    total / SECTION_KEYWORDS.len() as f64
}

#[async_trait]
impl Metric for RampUp {
    fn name(&self) -> MetricName {
        MetricName::RampUp
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let readme = fetcher.readme(ArtifactKind::Code).await;
        if readme.trim().is_empty() {
            return MetricValue::Scalar(0.0);
        }

        if let Some(analyzer) = &self.analyzer {
            match analyzer.rate_onboarding(&readme).await {
                Ok(score) => return MetricValue::Scalar(score.clamp(0.0, 1.0)),
                Err(e) => debug!("LLM onboarding rating failed, using heuristic: {}", e),
            }
        }

        MetricValue::Scalar(heuristic_score(&readme))
    }
}
