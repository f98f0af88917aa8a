//! Reviewedness scorer.
//!
//! Fraction of recent commits that went through review (merge commits or
//! merged pull requests). Without a linked code repository the metric is
//! not applicable and reports the -1 sentinel, which the aggregation
//! excludes rather than counting as zero.

use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use crate::models::record::round2;
use crate::models::CommitEntry;
use async_trait::async_trait;

/// Sentinel reported when no code repository is linked.
pub const NOT_APPLICABLE: f64 = -1.0;

pub struct Reviewedness;

pub(crate) fn score_commits(commits: &[CommitEntry]) -> f64 {
    if commits.is_empty() {
        return 0.0;
    }
    let reviewed = commits.iter().filter(|c| c.is_reviewed()).count();
    round2(reviewed as f64 / commits.len() as f64)
}

#[async_trait]
impl Metric for Reviewedness {
    fn name(&self) -> MetricName {
        MetricName::Reviewedness
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        if !fetcher.has_code_url() {
            return MetricValue::Scalar(NOT_APPLICABLE);
        }

        let commits = fetcher.recent_commits().await;
        MetricValue::Scalar(score_commits(&commits))
    }
}
