//! Evidence behind the model's performance claims.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;

/// Benchmarks in the model card (0.5), evaluation code (0.3) and an
/// evaluation dataset (0.2), each from the first handle of its category.
pub struct PerformanceClaimsMetric;

#[async_trait]
impl Metric for PerformanceClaimsMetric {
    fn name(&self) -> &'static str {
        "performance_claims"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Model, Category::Dataset, Category::Code]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let benchmarks = async {
            match resources.first_model() {
                Some(model) => model.has_performance_benchmarks().await,
                None => false,
            }
        };
        let evaluation_code = async {
            match resources.first_code() {
                Some(code) => code.has_evaluation_code().await,
                None => false,
            }
        };
        let evaluation_dataset = async {
            match resources.first_dataset() {
                Some(dataset) => dataset.has_evaluation_dataset().await,
                None => false,
            }
        };
        let (benchmarks, evaluation_code, evaluation_dataset) =
            tokio::join!(benchmarks, evaluation_code, evaluation_dataset);

        let mut score = 0.0;
        if benchmarks {
            score += 0.5;
        }
        if evaluation_code {
            score += 0.3;
        }
        if evaluation_dataset {
            score += 0.2;
        }
        Ok(MetricScore::Scalar(f64::min(score, 1.0)))
    }
}
