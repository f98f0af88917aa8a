//! Code quality scorer.
//!
//! Proxy signals for a maintained, documented repository: community size
//! (stars and forks), README depth, and recent activity.

use crate::config::ScoringConfig;
use crate::fetcher::{text, ArtifactFetcher, ArtifactKind};
use crate::metrics::{Metric, MetricName, MetricValue};
use crate::models::GithubStats;
use async_trait::async_trait;

pub struct CodeQuality;

pub(crate) fn score_components(stats: GithubStats, readme_words: usize, recent: bool) -> f64 {
    let mut score = 0.0;

    if stats.stars >= 10_000 {
        score += 0.1;
    }
    if stats.forks >= 5_000 {
        score += 0.1;
    }

    if readme_words >= 1_700 {
        score += 0.3;
    } else if readme_words >= 1_000 {
        score += 0.2;
    }

    if recent {
        score += 0.2;
    }

    score
}

#[async_trait]
impl Metric for CodeQuality {
    fn name(&self) -> MetricName {
        MetricName::CodeQuality
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let stats = fetcher.github_stats().await;
        let readme = fetcher.readme(ArtifactKind::Code).await;
        let recent = fetcher
            .recently_modified(ArtifactKind::Code, ScoringConfig::CODE_RECENCY_DAYS)
            .await;
        MetricValue::Scalar(score_components(stats, text::word_count(&readme), recent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ResourceReference;
    use crate::testutil::{fetcher_with, make_commit, StubCodeHost, StubModelHost};
    use chrono::{Duration, Utc};

    fn stats(stars: u64, forks: u64) -> GithubStats {
        GithubStats { stars, forks }
    }

    #[test]
    fn test_unknown_repo_scores_zero() {
        assert_eq!(score_components(stats(0, 0), 0, false), 0.0);
    }

    #[test]
    fn test_popularity_components() {
        assert_eq!(score_components(stats(10_000, 0), 0, false), 0.1);
        assert_eq!(score_components(stats(9_999, 5_000), 0, false), 0.1);
        assert_eq!(score_components(stats(10_000, 5_000), 0, false), 0.2);
    }

    #[test]
    fn test_readme_depth_tiers() {
        assert_eq!(score_components(stats(0, 0), 999, false), 0.0);
        assert_eq!(score_components(stats(0, 0), 1_000, false), 0.2);
        assert_eq!(score_components(stats(0, 0), 1_700, false), 0.3);
    }

    #[test]
    fn test_recency_component() {
        assert_eq!(score_components(stats(0, 0), 0, true), 0.2);
    }

    #[test]
    fn test_everything_sums() {
        assert!((score_components(stats(50_000, 10_000), 2_000, true) - 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_scores_repository() {
        let reference =
            ResourceReference::from_urls("", "", "https://github.com/owner/repo");
        let fresh = (Utc::now() - Duration::days(10)).to_rfc3339();
        let code = StubCodeHost::new()
            .with_repo(20_000, 8_000)
            .with_commits(vec![make_commit("update docs", 1, Some(&fresh))]);
        let fetcher = fetcher_with(reference, StubModelHost::new(), code);

        // 0.1 stars + 0.1 forks + 0.2 recency, README missing
        let score = CodeQuality.evaluate(&fetcher).await.as_scalar();
        assert!((score - 0.4).abs() < 1e-9);
    }
}
