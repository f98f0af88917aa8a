//! Reproducibility scorer.
//!
//! Looks for runnable demo code in the model card. Presence of demo
//! indicators earns partial credit (0.5); an LLM verdict, when configured,
//! can refine that to 0.0 (no usable demo) or 1.0 (runs clean). Nothing is
//! executed -- this is a documentation signal, not a sandbox run.

use crate::analysis::ReadmeAnalyzer;
use crate::fetcher::{ArtifactFetcher, ArtifactKind};
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Markers of demo code in a model card.
const DEMO_INDICATORS: [&str; 4] = [
    "```python",
    "from transformers",
    "import torch",
    "pipeline(",
];

pub struct Reproducibility {
    analyzer: Option<Arc<dyn ReadmeAnalyzer>>,
}

impl Reproducibility {
    pub fn new(analyzer: Option<Arc<dyn ReadmeAnalyzer>>) -> Self {
        Self { analyzer }
    }
}

pub(crate) fn has_demo_code(readme: &str) -> bool {
    let lowered = readme.to_lowercase();
    DEMO_INDICATORS.iter().any(|marker| lowered.contains(marker))
}

#[async_trait]
impl Metric for Reproducibility {
    fn name(&self) -> MetricName {
        MetricName::Reproducibility
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let readme = fetcher.readme(ArtifactKind::Model).await;
        if !has_demo_code(&readme) {
            return MetricValue::Scalar(0.0);
        }

        if let Some(analyzer) = &self.analyzer {
            match analyzer.classify_demo(&readme).await {
                Ok(verdict) => return MetricValue::Scalar(verdict.score()),
                Err(e) => debug!("LLM demo verdict failed, using partial credit: {}", e),
            }
        }

        MetricValue::Scalar(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DemoVerdict;
    use crate::locator::ResourceReference;
    use crate::testutil::{fetcher_with, StubCodeHost, StubModelHost};
    use crate::{Result, ScoreError};

    struct FixedAnalyzer(DemoVerdict);

    #[async_trait]
    impl ReadmeAnalyzer for FixedAnalyzer {
        async fn rate_onboarding(&self, _readme: &str) -> Result<f64> {
            Err(ScoreError::Llm {
                message: "not under test".into(),
            })
        }

        async fn classify_demo(&self, _readme: &str) -> Result<DemoVerdict> {
            Ok(self.0)
        }
    }

    fn model_with_readme(readme: &str) -> StubModelHost {
        StubModelHost::new().with_model_file("README.md", readme)
    }

    fn reference() -> ResourceReference {
        ResourceReference::from_urls("https://huggingface.co/org/model", "", "")
    }

    #[test]
    fn test_demo_indicators() {
        assert!(has_demo_code("```python\nprint('hi')\n```"));
        assert!(has_demo_code("Load it with from transformers import AutoModel"));
        assert!(has_demo_code("import torch"));
        assert!(has_demo_code("classifier = pipeline(\"sentiment-analysis\")"));
        assert!(!has_demo_code("A very good model."));
    }

    #[tokio::test]
    async fn test_no_demo_scores_zero() {
        let fetcher = fetcher_with(
            reference(),
            model_with_readme("Just a description."),
            StubCodeHost::new(),
        );
        let value = Reproducibility::new(None).evaluate(&fetcher).await;
        assert_eq!(value.as_scalar(), 0.0);
    }

    #[tokio::test]
    async fn test_demo_without_analyzer_is_partial_credit() {
        let fetcher = fetcher_with(
            reference(),
            model_with_readme("```python\nimport torch\n```"),
            StubCodeHost::new(),
        );
        let value = Reproducibility::new(None).evaluate(&fetcher).await;
        assert_eq!(value.as_scalar(), 0.5);
    }

    #[tokio::test]
    async fn test_analyzer_can_refine_to_full_credit() {
        let fetcher = fetcher_with(
            reference(),
            model_with_readme("```python\nimport torch\n```"),
            StubCodeHost::new(),
        );
        let metric = Reproducibility::new(Some(Arc::new(FixedAnalyzer(DemoVerdict::RunsClean))));
        assert_eq!(metric.evaluate(&fetcher).await.as_scalar(), 1.0);
    }

    #[tokio::test]
    async fn test_analyzer_can_reject_demo() {
        let fetcher = fetcher_with(
            reference(),
            model_with_readme("```python\n# pseudocode only\n```"),
            StubCodeHost::new(),
        );
        let metric = Reproducibility::new(Some(Arc::new(FixedAnalyzer(DemoVerdict::NoDemo))));
        assert_eq!(metric.evaluate(&fetcher).await.as_scalar(), 0.0);
    }
}
