//! Performance claims scorer.
//!
//! Binary signal: the code README either talks about measured performance
//! or it does not.

use crate::fetcher::{ArtifactFetcher, ArtifactKind};
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;

const CLAIM_KEYWORDS: [&str; 4] = ["accuracy", "benchmark", "perplexity", "performance"];

pub struct PerformanceClaims;

#[async_trait]
impl Metric for PerformanceClaims {
    fn name(&self) -> MetricName {
        MetricName::PerformanceClaims
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let readme = fetcher.readme(ArtifactKind::Code).await.to_lowercase();
        let claimed = CLAIM_KEYWORDS.iter().any(|k| readme.contains(k));
        MetricValue::Scalar(if claimed { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ResourceReference;
    use crate::testutil::{fetcher_with, StubCodeHost, StubModelHost};

    async fn score_for(readme: &str) -> f64 {
        let reference =
            ResourceReference::from_urls("", "", "https://github.com/owner/repo");
        let code = StubCodeHost::new().with_file("README.md", readme);
        let fetcher = fetcher_with(reference, StubModelHost::new(), code);
        PerformanceClaims.evaluate(&fetcher).await.as_scalar()
    }

    #[tokio::test]
    async fn test_benchmark_mention() {
        assert_eq!(score_for("Benchmark results on GLUE below.").await, 1.0);
    }

    #[tokio::test]
    async fn test_accuracy_mention() {
        assert_eq!(score_for("Reaches 92% accuracy on the dev set.").await, 1.0);
    }

    #[tokio::test]
    async fn test_no_claims() {
        assert_eq!(score_for("A friendly text model.").await, 0.0);
    }

    #[tokio::test]
    async fn test_empty_readme() {
        assert_eq!(score_for("").await, 0.0);
    }
}
