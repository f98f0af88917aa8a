//! Optional LLM-backed README analysis.
//!
//! Two scorers can delegate judgment calls to a text-completion endpoint:
//! onboarding quality for ramp-up time, and a run/no-run/needs-debug verdict
//! for reproducibility. Both sit behind [`ReadmeAnalyzer`] so the judgment
//! is a pluggable strategy; when no endpoint is configured the scorers use
//! their keyword heuristics instead.

pub mod llm;

pub use llm::LlmAnalyzer;

use crate::Result;
use async_trait::async_trait;

/// Verdict on the demo code embedded in a model README.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoVerdict {
    /// No usable demo code found.
    NoDemo,
    /// Demo code present but unlikely to run as written.
    NeedsDebugging,
    /// Demo code looks runnable as written.
    RunsClean,
}

impl DemoVerdict {
    /// The reproducibility score this verdict maps to.
    pub fn score(&self) -> f64 {
        match self {
            DemoVerdict::NoDemo => 0.0,
            DemoVerdict::NeedsDebugging => 0.5,
            DemoVerdict::RunsClean => 1.0,
        }
    }
}

/// Judgment calls delegated to an external analyzer.
#[async_trait]
pub trait ReadmeAnalyzer: Send + Sync {
    /// Rate how quickly a newcomer could get started, in [0,1].
    async fn rate_onboarding(&self, readme: &str) -> Result<f64>;

    /// Classify the runnability of demo code in a model README.
    async fn classify_demo(&self, readme: &str) -> Result<DemoVerdict>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_scores() {
        assert_eq!(DemoVerdict::NoDemo.score(), 0.0);
        assert_eq!(DemoVerdict::NeedsDebugging.score(), 0.5);
        assert_eq!(DemoVerdict::RunsClean.score(), 1.0);
    }
}
