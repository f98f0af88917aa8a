//! Evaluation orchestrator.
//!
//! Runs the full scorer set concurrently against one shared fetcher,
//! aggregates the weighted net score, and assembles the output record in
//! its fixed wire order. The orchestrator itself has no failure path:
//! every scorer resolves to a value, so `evaluate()` always returns a
//! complete record.

use crate::analysis::{LlmAnalyzer, ReadmeAnalyzer};
use crate::config::{ScoringConfig, Weights};
use crate::fetcher::ArtifactFetcher;
use crate::locator::ResourceReference;
use crate::metrics::{all_metrics, run_metric, MetricName, MetricOutcome, MetricValue};
use crate::metrics::reviewedness::NOT_APPLICABLE;
use crate::models::record::round2;
use crate::models::{EvaluationRecord, SizeScore};
use crate::network::{CodeHost, GitHubClient, HttpClient, HuggingFaceClient, ModelHost};
use crate::Result;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Scalar inputs to the net-score aggregation, one per metric with size
/// already reduced to its worst platform.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoreSet {
    pub license: f64,
    pub size_min: f64,
    pub ramp_up: f64,
    pub bus_factor: f64,
    pub performance_claims: f64,
    pub dataset_and_code: f64,
    pub dataset_quality: f64,
    pub code_quality: f64,
    pub reproducibility: f64,
    pub reviewedness: f64,
    pub treescore: f64,
}

/// Weighted net score with the reviewedness carve-out.
///
/// A reviewedness of -1 means "no code repository linked": the metric is
/// excluded and the remaining weights are renormalized by dividing the
/// partial sum by `1 - reviewedness_weight`, rather than letting the
/// sentinel drag the score down or float it as a free 0.5.
pub(crate) fn net_score(scores: &ScoreSet, weights: &Weights) -> f64 {
    let partial = weights.license * scores.license
        + weights.size * scores.size_min
        + weights.ramp_up * scores.ramp_up
        + weights.bus_factor * scores.bus_factor
        + weights.performance_claims * scores.performance_claims
        + weights.dataset_and_code * scores.dataset_and_code
        + weights.dataset_quality * scores.dataset_quality
        + weights.code_quality * scores.code_quality
        + weights.reproducibility * scores.reproducibility
        + weights.treescore * scores.treescore;

    let total = if scores.reviewedness == NOT_APPLICABLE {
        partial / (1.0 - weights.reviewedness)
    } else {
        partial + weights.reviewedness * scores.reviewedness
    };

    round2(total.clamp(0.0, 1.0))
}

/// Orchestrates one evaluation of a (model, dataset, code) triple.
pub struct Evaluator {
    reference: ResourceReference,
    model_host: Arc<dyn ModelHost>,
    code_host: Arc<dyn CodeHost>,
    analyzer: Option<Arc<dyn ReadmeAnalyzer>>,
    parent_net_scores: Vec<f64>,
    deadline: Option<Duration>,
    weights: Weights,
}

impl Evaluator {
    /// Build an evaluator against the real hubs. The LLM analyzer is
    /// enabled when the environment configures one.
    pub fn new(model_url: &str, dataset_url: &str, code_url: &str) -> Result<Self> {
        let http = Arc::new(HttpClient::new()?);
        let model_host: Arc<dyn ModelHost> =
            Arc::new(HuggingFaceClient::new(http.clone()));
        let code_host: Arc<dyn CodeHost> = Arc::new(GitHubClient::new(http.clone()));
        let analyzer = LlmAnalyzer::from_env(http)
            .map(|a| Arc::new(a) as Arc<dyn ReadmeAnalyzer>);

        let mut evaluator = Self::with_hosts(model_url, dataset_url, code_url, model_host, code_host);
        evaluator.analyzer = analyzer;
        Ok(evaluator)
    }

    /// Build an evaluator over injected hosts. This is the seam tests and
    /// alternative hub deployments use.
    pub fn with_hosts(
        model_url: &str,
        dataset_url: &str,
        code_url: &str,
        model_host: Arc<dyn ModelHost>,
        code_host: Arc<dyn CodeHost>,
    ) -> Self {
        Self {
            reference: ResourceReference::from_urls(model_url, dataset_url, code_url),
            model_host,
            code_host,
            analyzer: None,
            parent_net_scores: Vec::new(),
            deadline: None,
            weights: Weights::default(),
        }
    }

    /// Attach an LLM analyzer for the ramp-up and reproducibility scorers.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ReadmeAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Supply net scores of direct parent packages for the treescore
    /// metric. The lineage graph itself is the registry's concern.
    pub fn with_lineage(mut self, parent_net_scores: Vec<f64>) -> Self {
        self.parent_net_scores = parent_net_scores;
        self
    }

    /// Bound the whole evaluation. Scorers still in flight when the
    /// deadline passes are cancelled together and report their defaults.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run all eleven scorers and assemble the record. Never fails.
    pub async fn evaluate(&self) -> EvaluationRecord {
        let started = Instant::now();
        debug!(
            "Evaluating model={:?} dataset={:?} code={:?}/{:?}",
            self.reference.model_id,
            self.reference.dataset_id,
            self.reference.code_owner,
            self.reference.code_repo
        );

        let fetcher = ArtifactFetcher::new(
            self.reference.clone(),
            self.model_host.clone(),
            self.code_host.clone(),
        );
        let metrics = all_metrics(self.analyzer.clone(), self.parent_net_scores.clone());
        let semaphore = Arc::new(Semaphore::new(ScoringConfig::EVAL_CONCURRENCY));

        let tasks = metrics.iter().map(|metric| {
            let metric = metric.clone();
            let semaphore = semaphore.clone();
            let fetcher = &fetcher;
            let deadline = self.deadline;
            async move {
                let task_started = Instant::now();
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("BUG: evaluation semaphore closed");

                match deadline {
                    Some(limit) => {
                        let remaining = limit.saturating_sub(task_started.elapsed());
                        match tokio::time::timeout(remaining, run_metric(&*metric, fetcher)).await
                        {
                            Ok(outcome) => outcome,
                            Err(_) => {
                                debug!("{} cut off by deadline", metric.name().as_str());
                                MetricOutcome {
                                    name: metric.name(),
                                    value: metric.deadline_default(),
                                    latency_ms: task_started.elapsed().as_millis() as u64,
                                }
                            }
                        }
                    }
                    None => run_metric(&*metric, fetcher).await,
                }
            }
        });

        let outcomes = join_all(tasks).await;
        let record = self.assemble(outcomes, started);
        info!(
            "Evaluation of {:?} finished in {} ms with net score {}",
            record.name, record.net_score_latency, record.net_score
        );
        record
    }

    /// Merge completion-ordered outcomes into the fixed-order record.
    fn assemble(&self, outcomes: Vec<MetricOutcome>, started: Instant) -> EvaluationRecord {
        let mut by_name: HashMap<MetricName, MetricOutcome> =
            outcomes.into_iter().map(|o| (o.name, o)).collect();
        let mut take = |name: MetricName| {
            by_name.remove(&name).unwrap_or(MetricOutcome {
                name,
                value: MetricValue::Scalar(0.0),
                latency_ms: 0,
            })
        };

        let ramp_up = take(MetricName::RampUp);
        let bus_factor = take(MetricName::BusFactor);
        let performance_claims = take(MetricName::PerformanceClaims);
        let license = take(MetricName::License);
        let size = take(MetricName::Size);
        let dataset_and_code = take(MetricName::DatasetAndCode);
        let dataset_quality = take(MetricName::DatasetQuality);
        let code_quality = take(MetricName::CodeQuality);
        let reproducibility = take(MetricName::Reproducibility);
        let reviewedness = take(MetricName::Reviewedness);
        let treescore = take(MetricName::Treescore);

        let size_score = match size.value {
            MetricValue::PerPlatform(s) => s,
            MetricValue::Scalar(_) => SizeScore::default(),
        };

        let scores = ScoreSet {
            license: license.value.as_scalar(),
            size_min: size_score.min(),
            ramp_up: ramp_up.value.as_scalar(),
            bus_factor: bus_factor.value.as_scalar(),
            performance_claims: performance_claims.value.as_scalar(),
            dataset_and_code: dataset_and_code.value.as_scalar(),
            dataset_quality: dataset_quality.value.as_scalar(),
            code_quality: code_quality.value.as_scalar(),
            reproducibility: reproducibility.value.as_scalar(),
            reviewedness: reviewedness.value.as_scalar(),
            treescore: treescore.value.as_scalar(),
        };
        let net = net_score(&scores, &self.weights);

        EvaluationRecord {
            name: self.reference.model_name(),
            category: "MODEL".to_string(),
            net_score: net,
            net_score_latency: started.elapsed().as_millis() as u64,
            ramp_up_time: scores.ramp_up,
            ramp_up_time_latency: ramp_up.latency_ms,
            bus_factor: scores.bus_factor,
            bus_factor_latency: bus_factor.latency_ms,
            performance_claims: scores.performance_claims,
            performance_claims_latency: performance_claims.latency_ms,
            license: scores.license,
            license_latency: license.latency_ms,
            size_score,
            size_score_latency: size.latency_ms,
            dataset_and_code_score: scores.dataset_and_code,
            dataset_and_code_score_latency: dataset_and_code.latency_ms,
            dataset_quality: scores.dataset_quality,
            dataset_quality_latency: dataset_quality.latency_ms,
            code_quality: scores.code_quality,
            code_quality_latency: code_quality.latency_ms,
            reproducibility: scores.reproducibility,
            reproducibility_latency: reproducibility.latency_ms,
            reviewedness: scores.reviewedness,
            reviewedness_latency: reviewedness.latency_ms,
            treescore: scores.treescore,
            treescore_latency: treescore.latency_ms,
        }
    }
}
