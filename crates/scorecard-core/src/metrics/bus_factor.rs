//! Bus factor scorer.
//!
//! Step function on the contributor count of the linked repository: a
//! project maintained by one or two people is a succession risk regardless
//! of how good the code is.

use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use async_trait::async_trait;

pub struct BusFactor;

pub(crate) fn score_for_contributors(count: u64) -> f64 {
    match count {
        c if c >= 10 => 1.0,
        c if c >= 7 => 0.5,
        c if c >= 5 => 0.3,
        _ => 0.0,
    }
}

#[async_trait]
impl Metric for BusFactor {
    fn name(&self) -> MetricName {
        MetricName::BusFactor
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let count = fetcher.contributor_count().await;
        MetricValue::Scalar(score_for_contributors(count))
    }
}
