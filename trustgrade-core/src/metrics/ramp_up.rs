//! Ease of getting started, from documentation across all resources.

use super::{Metric, MetricScore, mean};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::{ResourceGroup, ResourceHandler};
use async_trait::async_trait;
use futures::future::join_all;

pub struct RampUpTimeMetric;

#[async_trait]
impl Metric for RampUpTimeMetric {
    fn name(&self) -> &'static str {
        "ramp_up_time"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Model, Category::Dataset, Category::Code]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let handlers = resources.handlers(self.required_categories());
        let scores = join_all(handlers.iter().map(|h| h.documentation_score())).await;
        Ok(MetricScore::Scalar(mean(&scores).unwrap_or(0.0)))
    }
}
