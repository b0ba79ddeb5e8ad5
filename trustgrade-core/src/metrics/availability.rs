//! Whether training data and code are linked at all.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;

/// 0.6 for any dataset, 0.4 for any code repository.
pub struct DatasetAndCodeMetric;

#[async_trait]
impl Metric for DatasetAndCodeMetric {
    fn name(&self) -> &'static str {
        "dataset_and_code_score"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Dataset, Category::Code]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let mut score = 0.0;
        if !resources.datasets().is_empty() {
            score += 0.6;
        }
        if !resources.code().is_empty() {
            score += 0.4;
        }
        Ok(MetricScore::Scalar(score))
    }
}
