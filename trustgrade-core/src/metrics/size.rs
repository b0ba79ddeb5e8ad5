//! Hardware deployability of the batch's model.

use super::{HardwareScores, Metric, MetricScore};
use crate::classifier::Category;
use crate::error::MetricError;
use crate::handlers::ResourceGroup;
use async_trait::async_trait;

/// Maps the first model's size onto four hardware classes.
pub struct SizeScoreMetric;

#[async_trait]
impl Metric for SizeScoreMetric {
    fn name(&self) -> &'static str {
        "size_score"
    }

    fn required_categories(&self) -> &'static [Category] {
        &[Category::Model]
    }

    async fn score(&self, resources: &ResourceGroup) -> Result<MetricScore, MetricError> {
        let Some(model) = resources.first_model() else {
            return Ok(MetricScore::Breakdown(HardwareScores::FALLBACK));
        };
        let scores = match model.size_mb().await {
            Ok(size_mb) => {
                tracing::debug!(model = %model.model_id(), size_mb, "Computed model size");
                HardwareScores::for_size_mb(size_mb)
            }
            Err(e) => {
                tracing::error!(model = %model.model_id(), error = %e, "Error calculating size compatibility");
                HardwareScores::FALLBACK
            }
        };
        Ok(MetricScore::Breakdown(scores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HUB, fixture};
    use serde_json::json;

    #[tokio::test]
    async fn test_small_model_fits_everywhere() {
        let (transport, resources) = fixture(&["https://huggingface.co/org/tiny"]);
        transport.respond_json(
            format!("{HUB}/api/models/org/tiny/tree/main"),
            &json!([{"path": "model.bin", "size": 10 * 1024 * 1024}]),
        );
        let result = SizeScoreMetric.calculate(&resources).await;
        assert_eq!(
            result.score,
            MetricScore::Breakdown(HardwareScores::for_size_mb(10.0))
        );
        assert_eq!(result.score.flatten(), 1.0);
    }

    #[tokio::test]
    async fn test_lookup_failure_uses_fallback() {
        let (transport, resources) = fixture(&["https://huggingface.co/org/m"]);
        transport.time_out(format!("{HUB}/api/models/org/m/tree/main"));
        let result = SizeScoreMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Breakdown(HardwareScores::FALLBACK));
    }

    #[tokio::test]
    async fn test_no_model_uses_fallback() {
        let (transport, resources) = fixture(&["https://github.com/org/repo"]);
        let result = SizeScoreMetric.calculate(&resources).await;
        assert_eq!(result.score, MetricScore::Breakdown(HardwareScores::FALLBACK));
        assert_eq!(result.score.flatten(), 0.25);
        assert!(transport.requests().is_empty());
    }
}
