//! Scorecard Core - Headless trust-scoring engine for ML model registries.
//!
//! Takes a (HuggingFace model URL, dataset URL, GitHub repo URL) triple and
//! produces a composite trustworthiness score in [0,1] plus eleven
//! latency-instrumented sub-scores, tolerating slow, flaky, or absent
//! upstream data at every step. It can be used programmatically without any
//! HTTP/RPC layer; the registry's API surface, persistence, and admission
//! validator are separate concerns that consume the record this crate
//! returns.
//!
//! # Example
//!
//! ```rust,ignore
//! use scorecard_core::Evaluator;
//!
//! #[tokio::main]
//! async fn main() -> scorecard_core::Result<()> {
//!     let evaluator = Evaluator::new(
//!         "https://huggingface.co/bert-base-uncased",
//!         "https://huggingface.co/datasets/squad",
//!         "https://github.com/huggingface/transformers",
//!     )?;
//!
//!     let record = evaluator.evaluate().await;
//!     println!("{}", record.to_json_line()?);
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod locator;
pub mod metrics;
pub mod models;
pub mod network;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use analysis::{DemoVerdict, LlmAnalyzer, ReadmeAnalyzer};
pub use config::{LlmConfig, NetworkConfig, ScoringConfig, Weights};
pub use engine::Evaluator;
pub use error::{Result, ScoreError};
pub use fetcher::{ArtifactFetcher, ArtifactKind};
pub use locator::ResourceReference;
pub use metrics::{Metric, MetricName, MetricOutcome, MetricValue};
pub use models::{EvaluationRecord, GithubStats, SizeScore};
pub use network::{CodeHost, GitHubClient, HttpClient, HuggingFaceClient, ModelHost};
