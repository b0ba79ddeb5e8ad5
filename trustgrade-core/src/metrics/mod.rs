//! Metric plug-in interface and registry.
//!
//! A metric declares the resource categories it reads and scores a
//! [`ResourceGroup`]. [`Metric::calculate`] wraps scoring with timing and
//! converts failures into a zero result so one metric never aborts an
//! evaluation.

pub mod availability;
pub mod bus_factor;
pub mod code_quality;
pub mod dataset_quality;
pub mod license;
pub mod performance;
pub mod ramp_up;
pub mod size;

pub use availability::DatasetAndCodeMetric;
pub use bus_factor::BusFactorMetric;
pub use code_quality::CodeQualityMetric;
pub use dataset_quality::DatasetQualityMetric;
pub use license::LicenseMetric;
pub use performance::PerformanceClaimsMetric;
pub use ramp_up::RampUpTimeMetric;
pub use size::SizeScoreMetric;

use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Per-hardware-class deployability of a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardwareScores {
    pub raspberry_pi: f64,
    pub jetson_nano: f64,
    pub desktop_pc: f64,
    pub aws_server: f64,
}

impl HardwareScores {
    /// Used when there is no model or its size cannot be determined.
    pub const FALLBACK: HardwareScores = HardwareScores {
        raspberry_pi: 0.0,
        jetson_nano: 0.0,
        desktop_pc: 0.5,
        aws_server: 0.5,
    };

    /// Map a model size in MB through the per-class thresholds.
    pub fn for_size_mb(size_mb: f64) -> Self {
        let tier = |high_below: f64, mid_below: f64, mid: f64, low: f64| {
            if size_mb < high_below {
                1.0
            } else if size_mb < mid_below {
                mid
            } else {
                low
            }
        };
        Self {
            raspberry_pi: tier(100.0, 500.0, 0.5, 0.0),
            jetson_nano: tier(1_000.0, 2_000.0, 0.7, 0.3),
            desktop_pc: tier(5_000.0, 10_000.0, 0.8, 0.5),
            aws_server: if size_mb < 20_000.0 { 1.0 } else { 0.9 },
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [
            self.raspberry_pi,
            self.jetson_nano,
            self.desktop_pc,
            self.aws_server,
        ]
    }

    pub fn mean(&self) -> f64 {
        self.values().iter().sum::<f64>() / 4.0
    }
}

/// A metric's score: a scalar, or a per-hardware breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricScore {
    Scalar(f64),
    Breakdown(HardwareScores),
}

impl MetricScore {
    /// The value used for weighting; breakdowns flatten to their mean.
    pub fn flatten(&self) -> f64 {
        match self {
            MetricScore::Scalar(value) => *value,
            MetricScore::Breakdown(scores) => scores.mean(),
        }
    }
}

impl Default for MetricScore {
    fn default() -> Self {
        MetricScore::Scalar(0.0)
    }
}

/// Score plus the wall-clock time spent computing it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricResult {
    pub score: MetricScore,
    pub latency_ms: u64,
}

impl MetricResult {
    /// Result recorded for a metric that failed or panicked.
    pub fn failed() -> Self {
        Self::default()
    }
}

/// A scoring unit over the resources of one batch.
#[async_trait]
pub trait Metric: Send + Sync {
    /// Name used as the result key and in the weight table.
    fn name(&self) -> &'static str;

    /// Categories this metric reads; other categories are hidden from it.
    fn required_categories(&self) -> &'static [Category];

    /// Compute the score. Missing resources are not an error.
    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError>;

    /// Score a restricted view of `resources` and time it.
    async fn calculate(&self, resources: &ResourceGroup) -> MetricResult {
        let view = resources.restricted_to(self.required_categories());
        let start = Instant::now();
        match self.score(&view).await {
            Ok(score) => MetricResult {
                score,
                latency_ms: start.elapsed().as_millis() as u64,
            },
            Err(e) => {
                tracing::error!(metric = self.name(), error = %e, "Metric calculation failed");
                MetricResult::failed()
            }
        }
    }
}

/// Ordered set of metrics, unique by name.
#[derive(Clone, Default)]
pub struct MetricRegistry {
    metrics: Vec<Arc<dyn Metric>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All eight built-in metrics.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(LicenseMetric));
        registry.register(Arc::new(SizeScoreMetric));
        registry.register(Arc::new(RampUpTimeMetric));
        registry.register(Arc::new(BusFactorMetric));
        registry.register(Arc::new(PerformanceClaimsMetric));
        registry.register(Arc::new(DatasetAndCodeMetric));
        registry.register(Arc::new(DatasetQualityMetric));
        registry.register(Arc::new(CodeQualityMetric));
        registry
    }

    /// Add a metric, replacing any existing one with the same name in place.
    pub fn register(&mut self, metric: Arc<dyn Metric>) {
        match self.metrics.iter_mut().find(|m| m.name() == metric.name()) {
            Some(slot) => *slot = metric,
            None => self.metrics.push(metric),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Metric>> {
        self.metrics.iter().find(|m| m.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Metric>> {
        self.metrics.iter()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Mean of `values`, or `None` when empty.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingMetric;

    #[async_trait]
    impl Metric for FailingMetric {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn required_categories(&self) -> &'static [Category] {
            &[Category::Model]
        }
        async fn score(&self, _resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
            Err(MetricError::Failed {
                metric: "failing".into(),
                message: "boom".into(),
            })
        }
    }

    #[test]
    fn test_hardware_thresholds() {
        assert_eq!(
            HardwareScores::for_size_mb(50.0),
            HardwareScores {
                raspberry_pi: 1.0,
                jetson_nano: 1.0,
                desktop_pc: 1.0,
                aws_server: 1.0
            }
        );
        assert_eq!(
            HardwareScores::for_size_mb(1_500.0),
            HardwareScores {
                raspberry_pi: 0.0,
                jetson_nano: 0.7,
                desktop_pc: 1.0,
                aws_server: 1.0
            }
        );
        assert_eq!(
            HardwareScores::for_size_mb(25_000.0),
            HardwareScores {
                raspberry_pi: 0.0,
                jetson_nano: 0.3,
                desktop_pc: 0.5,
                aws_server: 0.9
            }
        );
        assert_eq!(HardwareScores::for_size_mb(100.0).raspberry_pi, 0.5);
    }

    #[test]
    fn test_flatten_breakdown_to_mean() {
        assert_eq!(MetricScore::Scalar(0.4).flatten(), 0.4);
        assert_eq!(MetricScore::Breakdown(HardwareScores::FALLBACK).flatten(), 0.25);
    }

    #[test]
    fn test_score_serialization_shapes() {
        assert_eq!(serde_json::to_string(&MetricScore::Scalar(0.5)).unwrap(), "0.5");
        assert_eq!(
            serde_json::to_string(&MetricScore::Breakdown(HardwareScores::FALLBACK)).unwrap(),
            r#"{"raspberry_pi":0.0,"jetson_nano":0.0,"desktop_pc":0.5,"aws_server":0.5}"#
        );
    }

    #[test]
    fn test_builtin_registry_order() {
        assert_eq!(
            MetricRegistry::builtin().names(),
            vec![
                "license",
                "size_score",
                "ramp_up_time",
                "bus_factor",
                "performance_claims",
                "dataset_and_code_score",
                "dataset_quality",
                "code_quality",
            ]
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = MetricRegistry::builtin();
        registry.register(Arc::new(LicenseMetric));
        assert_eq!(registry.len(), 8);
        assert!(registry.get("license").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[tokio::test]
    async fn test_failed_metric_reports_zero() {
        let result = FailingMetric.calculate(&ResourceGroup::default()).await;
        assert_eq!(result, MetricResult::failed());
        assert_eq!(result.score, MetricScore::Scalar(0.0));
        assert_eq!(result.latency_ms, 0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 0.0]), Some(0.5));
    }
}
