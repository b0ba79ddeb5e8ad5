//! Knowledge-concentration risk from contributor counts.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::{ResourceGroup, ResourceHandler};
use async_trait::async_trait;
use futures::future::join_all;

pub struct BusFactorMetric;

#[async_trait]
impl Metric for BusFactorMetric {
    fn name(&self) -> &'static str {
        "bus_factor"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Model, Category::Dataset, Category::Code]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let handlers = resources.handlers(self.required_categories());
        let counts = join_all(handlers.iter().map(|h| h.contributor_count())).await;
        let average = if counts.is_empty() {
            0.0
        } else {
            counts.iter().sum::<u64>() as f64 / counts.len() as f64
        };
        Ok(MetricScore::Scalar(score_for_contributors(average)))
    }
}

pub(crate) fn score_for_contributors(average: f64) -> f64 {
    if average >= 10.0 {
        1.0
    } else if average >= 5.0 {
        0.8
    } else if average >= 2.0 {
        0.5
    } else {
        0.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CODE, HUB, fixture};
    use serde_json::json;

    #[test]
    fn test_thresholds() {
        assert_eq!(score_for_contributors(12.0), 1.0);
        assert_eq!(score_for_contributors(10.0), 1.0);
        assert_eq!(score_for_contributors(7.5), 0.8);
        assert_eq!(score_for_contributors(2.0), 0.5);
        assert_eq!(score_for_contributors(1.5), 0.2);
        assert_eq!(score_for_contributors(0.0), 0.2);
    }

    #[tokio::test]
    async fn test_average_across_categories() {
        let (transport, resources) = fixture(&[
            "https://huggingface.co/org/m",
            "https://huggingface.co/datasets/squad",
            "https://github.com/org/repo",
        ]);
        // model 10, dataset 5, code 3
        transport.respond_json(format!("{HUB}/api/models/org/m"), &json!({"downloads": 50000}));
        transport.respond_json(format!("{HUB}/api/datasets/squad"), &json!({"downloads": 50000}));
        transport.respond_json(
            format!("{CODE}/repos/org/repo/contributors"),
            &json!([{}, {}, {}]),
        );
        let result = BusFactorMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Scalar(0.8));
    }

    #[tokio::test]
    async fn test_no_resources_scores_lowest_bucket() {
        let (_transport, resources) = fixture(&[]);
        let result = BusFactorMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Scalar(0.2));
    }
}
