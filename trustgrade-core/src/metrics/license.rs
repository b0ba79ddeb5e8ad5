//! License compatibility of the batch's model.

use super::{Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::{ResourceGroup, ResourceHandler};
use async_trait::async_trait;

/// First model handle's license score; 0.0 without a model.
pub struct LicenseMetric;

#[async_trait]
impl Metric for LicenseMetric {
    fn name(&self) -> &'static str {
        "license"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Model]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let score = match resources.first_model() {
            Some(model) => model.license_score().await,
            None => 0.0,
        };
        Ok(MetricScore::Scalar(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HUB, fixture};

    #[tokio::test]
    async fn test_uses_first_model() {
        let (transport, resources) = fixture(&[
            "https://huggingface.co/org/licensed",
            "https://huggingface.co/org/unlicensed",
        ]);
        transport.respond_text(
            format!("{HUB}/org/licensed/raw/main/README.md"),
            "---\nlicense: apache-2.0\n---\n",
        );
        transport.respond_text(
            format!("{HUB}/org/unlicensed/raw/main/README.md"),
            "---\nlicense: other\n---\n",
        );
        let result = LicenseMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Scalar(1.0));
        assert_eq!(
            transport.request_count(&format!("{HUB}/org/unlicensed/raw/main/README.md")),
            0
        );
    }

    #[tokio::test]
    async fn test_no_model_scores_zero() {
        let (_transport, resources) = fixture(&["https://github.com/org/repo"]);
        let result = LicenseMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Scalar(0.0));
    }
}
