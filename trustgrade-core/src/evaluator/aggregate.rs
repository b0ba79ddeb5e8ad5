//! Weighted net score over the metrics that produced a result.

use crate::metrics::MetricResult;
use std::collections::BTreeMap;

/// Metric results keyed by metric name.
pub type MetricResults = BTreeMap<String, MetricResult>;

/// Fixed metric weights; they sum to 1.0.
pub const WEIGHTS: [(&str, f64); 8] = [
    ("license", 0.20),
    ("performance_claims", 0.15),
    ("ramp_up_time", 0.15),
    ("bus_factor", 0.10),
    ("size_score", 0.10),
    ("dataset_and_code_score", 0.10),
    ("dataset_quality", 0.10),
    ("code_quality", 0.10),
];

pub fn weight_of(metric: &str) -> Option<f64> {
    WEIGHTS
        .iter()
        .find(|(name, _)| *name == metric)
        .map(|(_, weight)| *weight)
}

/// Aggregate score and the summed latency of its contributors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetScore {
    pub score: f64,
    pub latency_ms: u64,
}

/// Weighted mean of the weighted metrics present in `results`, renormalized
/// over the weights actually accumulated. Metrics outside the weight table
/// neither contribute score nor latency.
pub fn net_score(results: &MetricResults) -> NetScore {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut latency_ms = 0u64;

    for (name, weight) in WEIGHTS {
        if let Some(result) = results.get(name) {
            weighted_sum += result.score.flatten() * weight;
            total_weight += weight;
            latency_ms = latency_ms.saturating_add(result.latency_ms);
        }
    }

    let score = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };
    NetScore { score, latency_ms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{HardwareScores, MetricScore};

    fn scalar(score: f64, latency_ms: u64) -> MetricResult {
        MetricResult {
            score: MetricScore::Scalar(score),
            latency_ms,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(weight_of("license"), Some(0.20));
        assert_eq!(weight_of("unknown"), None);
    }

    #[test]
    fn test_all_metrics_present() {
        let results: MetricResults = WEIGHTS
            .iter()
            .map(|(name, _)| (name.to_string(), scalar(1.0, 2)))
            .collect();
        let net = net_score(&results);
        assert!((net.score - 1.0).abs() < 1e-9);
        assert_eq!(net.latency_ms, 16);
    }

    #[test]
    fn test_renormalizes_over_present_metrics() {
        let mut results = MetricResults::new();
        results.insert("license".into(), scalar(1.0, 5));
        results.insert("code_quality".into(), scalar(0.0, 7));
        let net = net_score(&results);
        // 0.2 / (0.2 + 0.1)
        assert!((net.score - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(net.latency_ms, 12);
    }

    #[test]
    fn test_breakdown_flattens_to_mean() {
        let mut results = MetricResults::new();
        results.insert(
            "size_score".into(),
            MetricResult {
                score: MetricScore::Breakdown(HardwareScores::FALLBACK),
                latency_ms: 1,
            },
        );
        assert!((net_score(&results).score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_unweighted() {
        assert_eq!(net_score(&MetricResults::new()), NetScore::default());

        let mut results = MetricResults::new();
        results.insert("custom".into(), scalar(1.0, 99));
        assert_eq!(net_score(&results), NetScore::default());
    }
}
