//! Quality of the batch's dataset.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;

pub struct DatasetQualityMetric;

#[async_trait]
impl Metric for DatasetQualityMetric {
    fn name(&self) -> &'static str {
        "dataset_quality"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Dataset]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let score = match resources.first_dataset() {
            Some(dataset) => dataset.quality_score().await,
            None => 0.0,
        };
        Ok(MetricScore::Scalar(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HUB, fixture};
    use serde_json::json;

    #[tokio::test]
    async fn test_first_dataset_quality() {
        let (transport, resources) = fixture(&["https://huggingface.co/datasets/squad"]);
        transport.respond_json(
            format!("{HUB}/api/datasets/squad"),
            &json!({"cardData": {"a": 1}, "downloads": 200}),
        );
        let result = DatasetQualityMetric.calculate(&resources).await;
        assert!((result.score.flatten() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_absent_dataset() {
        let (_transport, resources) = fixture(&["https://huggingface.co/org/m"]);
        let result = DatasetQualityMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Scalar(0.0));
    }
}
