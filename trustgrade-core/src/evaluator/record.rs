//! The per-model output record.

use super::aggregate::{MetricResults, NetScore};
use crate::classifier::Category;
use crate::metrics::{MetricResult, MetricScore};
use serde::{Deserialize, Serialize};

/// One evaluated model. Field order is the NDJSON output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub name: String,
    pub category: Category,
    pub net_score: f64,
    pub net_score_latency: u64,
    pub ramp_up_time: MetricScore,
    pub ramp_up_time_latency: u64,
    pub bus_factor: MetricScore,
    pub bus_factor_latency: u64,
    pub performance_claims: MetricScore,
    pub performance_claims_latency: u64,
    pub license: MetricScore,
    pub license_latency: u64,
    pub size_score: MetricScore,
    pub size_score_latency: u64,
    pub dataset_and_code_score: MetricScore,
    pub dataset_and_code_score_latency: u64,
    pub dataset_quality: MetricScore,
    pub dataset_quality_latency: u64,
    pub code_quality: MetricScore,
    pub code_quality_latency: u64,
}

impl EvaluationRecord {
    /// Assemble a model record; metrics missing from `results` are reported as 0.0 / 0 ms.
    pub fn new(name: impl Into<String>, net: NetScore, results: &MetricResults) -> Self {
        let get = |metric: &str| results.get(metric).copied().unwrap_or_default();
        let MetricResult {
            score: ramp_up_time,
            latency_ms: ramp_up_time_latency,
        } = get("ramp_up_time");
        let MetricResult {
            score: bus_factor,
            latency_ms: bus_factor_latency,
        } = get("bus_factor");
        let MetricResult {
            score: performance_claims,
            latency_ms: performance_claims_latency,
        } = get("performance_claims");
        let MetricResult {
            score: license,
            latency_ms: license_latency,
        } = get("license");
        let MetricResult {
            score: size_score,
            latency_ms: size_score_latency,
        } = get("size_score");
        let MetricResult {
            score: dataset_and_code_score,
            latency_ms: dataset_and_code_score_latency,
        } = get("dataset_and_code_score");
        let MetricResult {
            score: dataset_quality,
            latency_ms: dataset_quality_latency,
        } = get("dataset_quality");
        let MetricResult {
            score: code_quality,
            latency_ms: code_quality_latency,
        } = get("code_quality");

        Self {
            name: name.into(),
            category: Category::Model,
            net_score: net.score,
            net_score_latency: net.latency_ms,
            ramp_up_time,
            ramp_up_time_latency,
            bus_factor,
            bus_factor_latency,
            performance_claims,
            performance_claims_latency,
            license,
            license_latency,
            size_score,
            size_score_latency,
            dataset_and_code_score,
            dataset_and_code_score_latency,
            dataset_quality,
            dataset_quality_latency,
            code_quality,
            code_quality_latency,
        }
    }

    /// Score of a metric by name.
    pub fn score(&self, metric: &str) -> Option<MetricScore> {
        match metric {
            "ramp_up_time" => Some(self.ramp_up_time),
            "bus_factor" => Some(self.bus_factor),
            "performance_claims" => Some(self.performance_claims),
            "license" => Some(self.license),
            "size_score" => Some(self.size_score),
            "dataset_and_code_score" => Some(self.dataset_and_code_score),
            "dataset_quality" => Some(self.dataset_quality),
            "code_quality" => Some(self.code_quality),
            _ => None,
        }
    }
}
