//! Treescore: inherited trust from lineage.
//!
//! Averages the net scores of the package's direct parents. The lineage
//! graph lives outside this engine; the caller resolves parents (the
//! fetcher's `parent_model_ids` gives it candidates) and supplies their net
//! scores as context. No context means no lineage credit.

use crate::fetcher::ArtifactFetcher;
use crate::metrics::{Metric, MetricName, MetricValue};
use crate::models::record::round2;
use async_trait::async_trait;

pub struct Treescore {
    parent_net_scores: Vec<f64>,
}

impl Treescore {
    pub fn new(parent_net_scores: Vec<f64>) -> Self {
        Self { parent_net_scores }
    }
}

#[async_trait]
impl Metric for Treescore {
    fn name(&self) -> MetricName {
        MetricName::Treescore
    }

    async fn evaluate(&self, _fetcher: &ArtifactFetcher) -> MetricValue {
        if self.parent_net_scores.is_empty() {
            return MetricValue::Scalar(0.0);
        }
        let sum: f64 = self.parent_net_scores.iter().sum();
        let mean = sum / self.parent_net_scores.len() as f64;
        MetricValue::Scalar(round2(mean.clamp(0.0, 1.0)))
    }
}
