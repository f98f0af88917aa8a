//! Model size scorer.
//!
//! Scores deployment suitability per platform: the closer the weight file
//! total is to a platform's threshold, the lower the score. A size of zero
//! means the size could not be determined and yields the all-zero map.

use crate::config::ScoringConfig;
use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use crate::models::record::round2;
use crate::models::SizeScore;
use async_trait::async_trait;

pub struct Size;

fn platform_score(size_gb: f64, threshold_gb: f64) -> f64 {
    round2((1.0 - size_gb / threshold_gb).clamp(0.0, 1.0))
}

/// Compute the per-platform map for a resolved size.
pub(crate) fn score_for_size(size_gb: f64) -> SizeScore {
    if size_gb <= 0.0 {
        return SizeScore::default();
    }

    let [(_, rpi), (_, jetson), (_, desktop), (_, aws)] = ScoringConfig::PLATFORM_THRESHOLDS_GB;
    SizeScore {
        raspberry_pi: platform_score(size_gb, rpi),
        jetson_nano: platform_score(size_gb, jetson),
        desktop_pc: platform_score(size_gb, desktop),
        aws_server: platform_score(size_gb, aws),
    }
}

#[async_trait]
impl Metric for Size {
    fn name(&self) -> MetricName {
        MetricName::Size
    }

    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue {
        let size_gb = fetcher.model_size_gb().await;
        MetricValue::PerPlatform(score_for_size(size_gb))
    }

    fn deadline_default(&self) -> MetricValue {
        MetricValue::PerPlatform(SizeScore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_yields_zero_map() {
        assert_eq!(score_for_size(0.0), SizeScore::default());
    }

    #[test]
    fn test_small_model_scores_high_everywhere() {
        let s = score_for_size(0.1);
        assert_eq!(s.raspberry_pi, 0.8);
        assert_eq!(s.jetson_nano, 0.9);
        assert_eq!(s.desktop_pc, 0.98);
        assert_eq!(s.aws_server, 0.99);
    }

    #[test]
    fn test_huge_model_clamps_to_zero() {
        let s = score_for_size(40.0);
        assert_eq!(s.raspberry_pi, 0.0);
        assert_eq!(s.jetson_nano, 0.0);
        assert_eq!(s.desktop_pc, 0.0);
        assert_eq!(s.aws_server, 0.0);
    }

    #[test]
    fn test_monotonicity() {
        // Scores never increase as the model grows
        let sizes = [0.1, 0.4, 1.0, 3.0, 8.0, 20.0];
        for pair in sizes.windows(2) {
            let smaller = score_for_size(pair[0]);
            let larger = score_for_size(pair[1]);
            assert!(larger.raspberry_pi <= smaller.raspberry_pi);
            assert!(larger.jetson_nano <= smaller.jetson_nano);
            assert!(larger.desktop_pc <= smaller.desktop_pc);
            assert!(larger.aws_server <= smaller.aws_server);
        }
    }

    #[test]
    fn test_values_in_range() {
        for size in [0.0, 0.5, 1.0, 6.0, 15.0, 100.0] {
            let s = score_for_size(size);
            for v in [s.raspberry_pi, s.jetson_nano, s.desktop_pc, s.aws_server] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
