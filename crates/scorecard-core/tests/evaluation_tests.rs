//! Integration tests for the evaluation pipeline.
//!
//! These drive `Evaluator` end-to-end over in-memory hub hosts, verifying
//! the record contract: all fields present, wire order, score ranges, and
//! the reviewedness sentinel semantics.

use async_trait::async_trait;
use scorecard_core::models::{
    CommitAuthor, CommitDetail, CommitEntry, CommitParent, Contributor, HfDatasetInfo,
    HfModelInfo, HfSibling, RepoInfo,
};
use scorecard_core::{
    CodeHost, Evaluator, ModelHost, Result, ScoreError, SizeScore, Weights,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixture-backed model hub.
#[derive(Default)]
struct FixtureModelHost {
    model_info: HfModelInfo,
    dataset_info: HfDatasetInfo,
    model_files: HashMap<String, String>,
    dataset_files: HashMap<String, String>,
    file_sizes: HashMap<String, u64>,
}

#[async_trait]
impl ModelHost for FixtureModelHost {
    async fn model_info(&self, _repo_id: &str) -> Result<HfModelInfo> {
        Ok(self.model_info.clone())
    }

    async fn dataset_info(&self, _repo_id: &str) -> Result<HfDatasetInfo> {
        Ok(self.dataset_info.clone())
    }

    async fn raw_model_file(&self, _repo_id: &str, filename: &str) -> Result<String> {
        self.model_files
            .get(filename)
            .cloned()
            .ok_or_else(|| not_found(filename))
    }

    async fn raw_dataset_file(&self, _repo_id: &str, filename: &str) -> Result<String> {
        self.dataset_files
            .get(filename)
            .cloned()
            .ok_or_else(|| not_found(filename))
    }

    async fn file_size(&self, _repo_id: &str, filename: &str) -> Result<Option<u64>> {
        Ok(self.file_sizes.get(filename).copied())
    }
}

/// Fixture-backed code host.
#[derive(Default)]
struct FixtureCodeHost {
    repo_info: Option<RepoInfo>,
    contributors: Vec<Contributor>,
    commits: Vec<CommitEntry>,
    files: HashMap<String, String>,
}

#[async_trait]
impl CodeHost for FixtureCodeHost {
    async fn repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo> {
        self.repo_info
            .clone()
            .ok_or_else(|| not_found(&format!("{}/{}", owner, repo)))
    }

    async fn contributors(&self, _owner: &str, _repo: &str) -> Result<Vec<Contributor>> {
        Ok(self.contributors.clone())
    }

    async fn recent_commits(&self, _owner: &str, _repo: &str) -> Result<Vec<CommitEntry>> {
        Ok(self.commits.clone())
    }

    async fn raw_file(&self, _owner: &str, _repo: &str, path: &str) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| not_found(path))
    }
}

fn not_found(what: &str) -> ScoreError {
    ScoreError::NotFound {
        resource: what.to_string(),
    }
}

/// Honor RUST_LOG when debugging a failing scenario.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn commit(message: &str, parents: usize) -> CommitEntry {
    CommitEntry {
        sha: "abc".into(),
        commit: CommitDetail {
            message: message.to_string(),
            author: Some(CommitAuthor {
                date: Some(chrono::Utc::now().to_rfc3339()),
            }),
        },
        parents: (0..parents)
            .map(|i| CommitParent {
                sha: format!("p{}", i),
            })
            .collect(),
    }
}

/// The healthy-project scenario: permissive license, active maintained
/// repo, documented dataset, small model.
fn healthy_hosts() -> (FixtureModelHost, FixtureCodeHost) {
    let mut model = FixtureModelHost::default();
    model.model_info = HfModelInfo {
        last_modified: Some(chrono::Utc::now().to_rfc3339()),
        tags: vec!["pytorch".into()],
        card_data: None,
        siblings: vec![
            HfSibling {
                rfilename: "config.json".into(),
                size: None,
            },
            HfSibling {
                rfilename: "model.safetensors".into(),
                size: Some(200_000_000),
            },
        ],
    };
    model.model_files.insert(
        "README.md".into(),
        "---\nlicense: mit\n---\n# BERT\n\n```python\nfrom transformers import pipeline\n```\n"
            .into(),
    );
    model.dataset_info = HfDatasetInfo {
        downloads: Some(150_000),
        card_data: None,
        last_modified: None,
    };
    model.dataset_files.insert(
        "README.md".into(),
        "# SQuAD\n\nlicense cc-by, train and test splits described here".into(),
    );

    let mut code = FixtureCodeHost::default();
    code.repo_info = Some(RepoInfo {
        stargazers_count: 50_000,
        forks_count: 10_000,
        pushed_at: None,
        default_branch: Some("main".into()),
    });
    code.contributors = (0..12)
        .map(|i| Contributor {
            login: format!("dev{}", i),
            contributions: 50,
        })
        .collect();
    code.commits = vec![
        commit("Merge pull request #100 from fork/feature", 1),
        commit("merged release branch", 2),
        commit("fix flaky test", 1),
        commit("bump version", 1),
    ];
    code.files.insert(
        "README.md".into(),
        "# Transformers\n\n## Installation\n\npip install transformers then verify \
         the runtime works on your machine\n\n## Usage\n\nLoad a model and run an \
         example pipeline with benchmark accuracy numbers reported below"
            .into(),
    );

    (model, code)
}

fn healthy_evaluator() -> Evaluator {
    let (model, code) = healthy_hosts();
    Evaluator::with_hosts(
        "https://huggingface.co/bert-base-uncased",
        "https://huggingface.co/datasets/squad",
        "https://github.com/huggingface/transformers",
        Arc::new(model),
        Arc::new(code),
    )
}

#[tokio::test]
async fn test_healthy_project_end_to_end() {
    init_tracing();
    let record = healthy_evaluator().evaluate().await;

    assert_eq!(record.name, "bert-base-uncased");
    assert_eq!(record.category, "MODEL");

    assert_eq!(record.license, 1.0);
    assert_eq!(record.bus_factor, 1.0);
    assert_eq!(record.performance_claims, 1.0);
    assert_eq!(record.dataset_and_code_score, 1.0);
    assert_eq!(record.reproducibility, 0.5);
    assert_eq!(record.reviewedness, 0.5);

    // 0.2 GB model: roomy on large targets, tight on the smallest
    assert!(record.size_score.desktop_pc > 0.9);
    assert!(record.size_score.aws_server > 0.9);
    assert!(record.size_score.raspberry_pi >= 0.6);
    assert!(record.size_score.jetson_nano >= 0.8);

    assert!(record.net_score > 0.5);
    assert!(record.net_score <= 1.0);
}

#[tokio::test]
async fn test_all_empty_urls_never_fail() {
    let evaluator = Evaluator::with_hosts(
        "",
        "",
        "",
        Arc::new(FixtureModelHost::default()),
        Arc::new(FixtureCodeHost::default()),
    );

    let record = evaluator.evaluate().await;

    assert_eq!(record.name, "");
    assert_eq!(record.category, "MODEL");
    assert_eq!(record.reviewedness, -1.0);
    assert_eq!(record.size_score, SizeScore::default());
    assert!((0.0..=1.0).contains(&record.net_score));
}

#[tokio::test]
async fn test_score_ranges() {
    let record = healthy_evaluator().evaluate().await;

    for score in [
        record.ramp_up_time,
        record.bus_factor,
        record.performance_claims,
        record.license,
        record.dataset_and_code_score,
        record.dataset_quality,
        record.code_quality,
        record.reproducibility,
        record.treescore,
        record.net_score,
    ] {
        assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }

    for platform in [
        record.size_score.raspberry_pi,
        record.size_score.jetson_nano,
        record.size_score.desktop_pc,
        record.size_score.aws_server,
    ] {
        assert!((0.0..=1.0).contains(&platform));
    }
}

#[tokio::test]
async fn test_reviewedness_sentinel_is_excluded_not_zeroed() {
    let (model, _) = healthy_hosts();
    let evaluator = Evaluator::with_hosts(
        "https://huggingface.co/bert-base-uncased",
        "https://huggingface.co/datasets/squad",
        "", // no code repository
        Arc::new(model),
        Arc::new(FixtureCodeHost::default()),
    );

    let record = evaluator.evaluate().await;
    assert_eq!(record.reviewedness, -1.0);

    // Reconstruct what the net score would be if the sentinel were
    // naively zeroed into the weighted sum.
    let w = Weights::default();
    let partial = w.license * record.license
        + w.size * record.size_score.min()
        + w.ramp_up * record.ramp_up_time
        + w.bus_factor * record.bus_factor
        + w.performance_claims * record.performance_claims
        + w.dataset_and_code * record.dataset_and_code_score
        + w.dataset_quality * record.dataset_quality
        + w.code_quality * record.code_quality
        + w.reproducibility * record.reproducibility
        + w.treescore * record.treescore;
    let naive = (partial * 100.0).round() / 100.0;
    let renormalized = ((partial / (1.0 - w.reviewedness)) * 100.0).round() / 100.0;

    assert_eq!(record.net_score, renormalized);
    assert_ne!(record.net_score, naive);
}

#[tokio::test]
async fn test_lineage_context_feeds_treescore() {
    let (model, code) = healthy_hosts();
    let evaluator = Evaluator::with_hosts(
        "https://huggingface.co/bert-base-uncased",
        "https://huggingface.co/datasets/squad",
        "https://github.com/huggingface/transformers",
        Arc::new(model),
        Arc::new(code),
    )
    .with_lineage(vec![0.9, 0.7]);

    let record = evaluator.evaluate().await;
    assert_eq!(record.treescore, 0.8);
}

#[tokio::test]
async fn test_ndjson_line_field_order() {
    let record = healthy_evaluator().evaluate().await;
    let line = record.to_json_line().unwrap();

    let order = [
        "\"name\"",
        "\"category\"",
        "\"net_score\"",
        "\"net_score_latency\"",
        "\"ramp_up_time\"",
        "\"bus_factor\"",
        "\"performance_claims\"",
        "\"license\"",
        "\"size_score\"",
        "\"dataset_and_code_score\"",
        "\"dataset_quality\"",
        "\"code_quality\"",
        "\"reproducibility\"",
        "\"reviewedness\"",
        "\"treescore\"",
    ];

    let mut last = 0;
    for field in order {
        let pos = line.find(field).unwrap_or_else(|| panic!("{} missing", field));
        assert!(pos >= last, "{} out of order", field);
        last = pos;
    }
}
