//! Dataset-and-code availability scorer.
//!
//! Half a point for a linked dataset, half for a linked code repository.
//! Pure bookkeeping over the resolved reference; no network involved.

use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;

pub struct DatasetAndCode;

#[async_trait]
impl Metric for DatasetAndCode {
    fn name(&self) -> MetricName {
        MetricName::DatasetAndCode
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let has_code = fetcher.has_code_url() as u8 as f64;
        let has_dataset = fetcher.has_dataset_url() as u8 as f64;
        MetricValue::Scalar((has_code + has_dataset) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ResourceReference;
    use crate::testutil::{fetcher_with, StubCodeHost, StubModelHost};

    async fn score_for(dataset_url: &str, code_url: &str) -> f64 {
        let reference = ResourceReference::from_urls("", dataset_url, code_url);
        let fetcher = fetcher_with(reference, StubModelHost::new(), StubCodeHost::new());
        DatasetAndCode.evaluate(&fetcher).await.as_scalar()
    }

    #[tokio::test]
    async fn test_both_present() {
        assert_eq!(
            score_for(
                "https://huggingface.co/datasets/squad",
                "https://github.com/owner/repo"
            )
            .await,
            1.0
        );
    }

    #[tokio::test]
    async fn test_code_only_is_exactly_half() {
        assert_eq!(score_for("", "https://github.com/owner/repo").await, 0.5);
    }

    #[tokio::test]
    async fn test_dataset_only_is_exactly_half() {
        assert_eq!(
            score_for("https://huggingface.co/datasets/squad", "").await,
            0.5
        );
    }

    #[tokio::test]
    async fn test_neither() {
        assert_eq!(score_for("", "").await, 0.0);
    }
}
