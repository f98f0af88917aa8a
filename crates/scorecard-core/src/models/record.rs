//! The evaluation output record and its wire format.
//!
//! Field declaration order is a contract: downstream NDJSON consumers and
//! the admission validator read fields positionally, and serde_json emits
//! struct fields in declaration order.

use serde::{Deserialize, Serialize};

/// Round to two decimal places, the precision of every reported score.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-platform deployment suitability scores, each in [0,1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeScore {
    pub raspberry_pi: f64,
    pub jetson_nano: f64,
    pub desktop_pc: f64,
    pub aws_server: f64,
}

impl SizeScore {
    /// The conservative "worst deployment target" reduction used for the
    /// net score.
    pub fn min(&self) -> f64 {
        self.raspberry_pi
            .min(self.jetson_nano)
            .min(self.desktop_pc)
            .min(self.aws_server)
    }
}

/// One complete evaluation result for a (model, dataset, code) triple.
///
/// Constructed fresh per evaluation and immutable once returned. Every
/// score except `size_score` is a scalar in [0,1]; `reviewedness` may be
/// exactly -1.0 when no code repository is linked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub name: String,
    pub category: String,
    pub net_score: f64,
    pub net_score_latency: u64,
    pub ramp_up_time: f64,
    pub ramp_up_time_latency: u64,
    pub bus_factor: f64,
    pub bus_factor_latency: u64,
    pub performance_claims: f64,
    pub performance_claims_latency: u64,
    pub license: f64,
    pub license_latency: u64,
    pub size_score: SizeScore,
    pub size_score_latency: u64,
    pub dataset_and_code_score: f64,
    pub dataset_and_code_score_latency: u64,
    pub dataset_quality: f64,
    pub dataset_quality_latency: u64,
    pub code_quality: f64,
    pub code_quality_latency: u64,
    pub reproducibility: f64,
    pub reproducibility_latency: u64,
    pub reviewedness: f64,
    pub reviewedness_latency: u64,
    pub treescore: f64,
    pub treescore_latency: u64,
}

impl EvaluationRecord {
    /// Serialize as a single NDJSON line.
    pub fn to_json_line(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
