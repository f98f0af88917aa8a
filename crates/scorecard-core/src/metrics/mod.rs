//! The eleven metric calculators.
//!
//! Each unit is stateless apart from injected collaborators, consumes only
//! the [`ArtifactFetcher`] facade, and always produces a value -- fetcher
//! accessors already degrade to safe defaults, so scorers have no failure
//! path. A shared runner measures wall-clock latency around each body.

pub mod bus_factor;
pub mod code_quality;
pub mod dataset_and_code;
pub mod dataset_quality;
pub mod license;
pub mod performance_claims;
pub mod ramp_up;
pub mod reproducibility;
pub mod reviewedness;
pub mod size;
pub mod treescore;

use crate::analysis::ReadmeAnalyzer;
use crate::fetcher::ArtifactFetcher;
use crate::models::SizeScore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Identity of each metric, in wire-format order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RampUp,
    BusFactor,
    PerformanceClaims,
    License,
    Size,
    DatasetAndCode,
    DatasetQuality,
    CodeQuality,
    Reproducibility,
    Reviewedness,
    Treescore,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RampUp => "ramp_up_time",
            MetricName::BusFactor => "bus_factor",
            MetricName::PerformanceClaims => "performance_claims",
            MetricName::License => "license",
            MetricName::Size => "size_score",
            MetricName::DatasetAndCode => "dataset_and_code_score",
            MetricName::DatasetQuality => "dataset_quality",
            MetricName::CodeQuality => "code_quality",
            MetricName::Reproducibility => "reproducibility",
            MetricName::Reviewedness => "reviewedness",
            MetricName::Treescore => "treescore",
        }
    }
}

/// A computed metric value.
///
/// All metrics are scalars except size, which scores each deployment
/// platform separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Scalar(f64),
    PerPlatform(SizeScore),
}

impl MetricValue {
    /// Reduce to a single scalar: per-platform scores collapse to their
    /// minimum (worst deployment target).
    pub fn as_scalar(&self) -> f64 {
        match self {
            MetricValue::Scalar(v) => *v,
            MetricValue::PerPlatform(s) => s.min(),
        }
    }
}

/// One metric's result with its measured latency.
#[derive(Debug, Clone)]
pub struct MetricOutcome {
    pub name: MetricName,
    pub value: MetricValue,
    pub latency_ms: u64,
}

/// A single metric calculator.
#[async_trait]
pub trait Metric: Send + Sync {
    fn name(&self) -> MetricName;

    /// Compute the metric. Infallible: internal failures resolve to the
    /// metric's documented default instead of propagating.
    async fn evaluate(&self, fetcher: &ArtifactFetcher) -> MetricValue;

    /// Value reported if the evaluation deadline cuts this metric off.
    fn deadline_default(&self) -> MetricValue {
        MetricValue::Scalar(0.0)
    }
}

/// Run one metric, measuring wall-clock latency around its body.
pub async fn run_metric(metric: &dyn Metric, fetcher: &ArtifactFetcher) -> MetricOutcome {
    let started = Instant::now();
    let value = metric.evaluate(fetcher).await;
    MetricOutcome {
        name: metric.name(),
        value,
        latency_ms: started.elapsed().as_millis() as u64,
    }
}

/// Construct the full scorer set for one evaluation.
///
/// `analyzer` enables the LLM paths in ramp-up and reproducibility;
/// `parent_net_scores` is the lineage context consumed by treescore.
pub fn all_metrics(
    analyzer: Option<Arc<dyn ReadmeAnalyzer>>,
    parent_net_scores: Vec<f64>,
) -> Vec<Arc<dyn Metric>> {
    vec![
        Arc::new(ramp_up::RampUp::new(analyzer.clone())),
        Arc::new(bus_factor::BusFactor),
        Arc::new(performance_claims::PerformanceClaims),
        Arc::new(license::License),
        Arc::new(size::Size),
        Arc::new(dataset_and_code::DatasetAndCode),
        Arc::new(dataset_quality::DatasetQuality),
        Arc::new(code_quality::CodeQuality),
        Arc::new(reproducibility::Reproducibility::new(analyzer)),
        Arc::new(reviewedness::Reviewedness),
        Arc::new(treescore::Treescore::new(parent_net_scores)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_set_has_eleven_metrics() {
        let metrics = all_metrics(None, Vec::new());
        assert_eq!(metrics.len(), 11);
    }

    #[test]
    fn test_scalar_reduction() {
        assert_eq!(MetricValue::Scalar(0.4).as_scalar(), 0.4);
        let per_platform = MetricValue::PerPlatform(SizeScore {
            raspberry_pi: 0.1,
            jetson_nano: 0.5,
            desktop_pc: 0.9,
            aws_server: 1.0,
        });
        assert_eq!(per_platform.as_scalar(), 0.1);
    }
}
