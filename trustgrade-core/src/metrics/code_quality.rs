//! Quality of the batch's code repository.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;

pub struct CodeQualityMetric;

#[async_trait]
impl Metric for CodeQualityMetric {
    fn name(&self) -> &'static str {
        "code_quality"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Code]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let score = match resources.first_code() {
            Some(code) => code.code_quality_score().await,
            None => 0.0,
        };
        Ok(MetricScore::Scalar(score))
    }
}
