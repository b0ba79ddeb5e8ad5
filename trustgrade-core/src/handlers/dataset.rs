//! Dataset hub entry handler.

use super::cache::{CacheKey, CachedValue, ResourceCache};
use super::{ResourceHandler, VIEW_SEGMENTS, path_segments};
use crate::classifier::Category;
use crate::error::{HandlerError, HubError};
use crate::hub::{DatasetInfo, HubClient};
use async_trait::async_trait;
use std::sync::Arc;

/// Handler for one dataset on the hub.
pub struct DatasetHandler {
    url: String,
    dataset_id: String,
    hub: Arc<HubClient>,
    cache: ResourceCache,
}

impl DatasetHandler {
    pub fn new(url: &str, hub: Arc<HubClient>) -> Result<Self, HandlerError> {
        let dataset_id = dataset_id_from_url(url)?;
        Ok(Self {
            url: url.to_string(),
            dataset_id,
            hub,
            cache: ResourceCache::new(),
        })
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    pub async fn info(&self) -> Result<Arc<DatasetInfo>, HubError> {
        if let Some(CachedValue::DatasetInfo(info)) = self.cache.get(CacheKey::DatasetInfo) {
            return Ok(info);
        }
        let info = Arc::new(self.hub.dataset_info(&self.dataset_id).await?);
        self.cache
            .insert(CacheKey::DatasetInfo, CachedValue::DatasetInfo(info.clone()));
        Ok(info)
    }

    /// Quality from card presence, popularity, tagging and file count.
    pub async fn quality_score(&self) -> f64 {
        match self.info().await {
            Ok(info) => quality_from_info(&info),
            Err(e) => {
                tracing::error!(dataset = %self.dataset_id, error = %e, "Error evaluating dataset quality");
                0.0
            }
        }
    }

    /// Whether the dataset is tagged for evaluation or benchmarking.
    pub async fn has_evaluation_dataset(&self) -> bool {
        match self.info().await {
            Ok(info) => info
                .tags
                .iter()
                .any(|t| t == "evaluation" || t == "benchmark"),
            Err(e) => {
                tracing::error!(dataset = %self.dataset_id, error = %e, "Error checking evaluation tags");
                false
            }
        }
    }
}

#[async_trait]
impl ResourceHandler for DatasetHandler {
    fn category(&self) -> Category {
        Category::Dataset
    }

    fn url(&self) -> &str {
        &self.url
    }

    /// Dataset licenses are not assessed.
    async fn license_score(&self) -> f64 {
        0.0
    }

    async fn documentation_score(&self) -> f64 {
        let info = match self.info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(dataset = %self.dataset_id, error = %e, "Error evaluating dataset documentation");
                return 0.0;
            }
        };
        let mut score = 0.0;
        if info.has_card_data() {
            score += 0.5;
        }
        if info.has_description() {
            score += 0.3;
        }
        if !info.tags.is_empty() {
            score += 0.2;
        }
        f64::min(score, 1.0)
    }

    async fn contributor_count(&self) -> u64 {
        match self.info().await {
            Ok(info) => match info.downloads.unwrap_or(0) {
                d if d > 10_000 => 5,
                d if d > 1_000 => 3,
                _ => 1,
            },
            Err(e) => {
                tracing::error!(dataset = %self.dataset_id, error = %e, "Error fetching dataset metadata");
                1
            }
        }
    }
}

fn quality_from_info(info: &DatasetInfo) -> f64 {
    let mut score = 0.0;
    if info.has_card_data() {
        score += 0.3;
    }
    score += match info.downloads.unwrap_or(0) {
        d if d > 1_000 => 0.3,
        d if d > 100 => 0.2,
        d if d > 10 => 0.1,
        _ => 0.0,
    };
    if info.tags.len() > 2 {
        score += 0.2;
    }
    if info.siblings.len() > 1 {
        score += 0.2;
    }
    f64::min(score, 1.0)
}

/// Path segments that start a file view rather than name the dataset.
/// `datasets/<name>` or `datasets/<owner>/<name>`.
fn dataset_id_from_url(url: &str) -> Result<String, HandlerError> {
    let segments = path_segments(url)?;
    match segments.as_slice() {
        [prefix, first, rest @ ..] if prefix.eq_ignore_ascii_case("datasets") => match rest.first() {
            Some(second) if !VIEW_SEGMENTS.contains(&second.as_str()) => {
                Ok(format!("{first}/{second}"))
            }
            _ => Ok(first.clone()),
        },
        _ => Err(HandlerError::InvalidUrl {
            url: url.to_string(),
            reason: "missing dataset id".into(),
        }),
    }
}
