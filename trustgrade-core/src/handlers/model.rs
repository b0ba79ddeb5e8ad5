//! Model hub entry handler.

use super::cache::{CacheKey, CachedValue, ResourceCache};
use super::license::readme_license_score;
use super::{ResourceHandler, VIEW_SEGMENTS, path_segments};
use crate::classifier::Category;
use crate::error::{HandlerError, HubError};
use crate::hub::{HubClient, ModelInfo};
use async_trait::async_trait;
use std::sync::Arc;

const BENCHMARK_KEYWORDS: &[&str] = &["benchmark", "evaluation", "performance", "score", "metric"];
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Handler for one model on the hub.
pub struct ModelHandler {
    url: String,
    model_id: String,
    hub: Arc<HubClient>,
    cache: ResourceCache,
}

impl ModelHandler {
    /// Build a handler; the model id is the first two path segments
    /// (or only the first, for un-namespaced models and view URLs like `name/tree/main`).
    pub fn new(url: &str, hub: Arc<HubClient>) -> Result<Self, HandlerError> {
        let model_id = model_id_from_url(url)?;
        Ok(Self {
            url: url.to_string(),
            model_id,
            hub,
            cache: ResourceCache::new(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Model name without its namespace (`bert-base-uncased` for `google-bert/bert-base-uncased`).
    pub fn display_name(&self) -> &str {
        display_name(&self.model_id)
    }

    pub async fn info(&self) -> Result<Arc<ModelInfo>, HubError> {
        if let Some(CachedValue::ModelInfo(info)) = self.cache.get(CacheKey::ModelInfo) {
            return Ok(info);
        }
        let info = Arc::new(self.hub.model_info(&self.model_id).await?);
        self.cache
            .insert(CacheKey::ModelInfo, CachedValue::ModelInfo(info.clone()));
        Ok(info)
    }

    pub async fn readme(&self) -> Result<Arc<str>, HubError> {
        if let Some(CachedValue::Readme(text)) = self.cache.get(CacheKey::Readme) {
            return Ok(text);
        }
        let text: Arc<str> = Arc::from(self.hub.model_readme(&self.model_id).await?);
        self.cache
            .insert(CacheKey::Readme, CachedValue::Readme(text.clone()));
        Ok(text)
    }

    /// Total size of the model's files in MB.
    pub async fn size_mb(&self) -> Result<f64, HandlerError> {
        if let Some(CachedValue::SizeMb(size)) = self.cache.get(CacheKey::SizeMb) {
            return Ok(size);
        }
        let files = self
            .hub
            .model_tree(&self.model_id)
            .await
            .map_err(|source| HandlerError::Lookup {
                resource: self.model_id.clone(),
                source,
            })?;
        let total_bytes: u64 = files.iter().filter_map(|f| f.size).sum();
        let size = total_bytes as f64 / BYTES_PER_MB;
        self.cache.insert(CacheKey::SizeMb, CachedValue::SizeMb(size));
        Ok(size)
    }

    /// Whether the model card mentions benchmark or evaluation results.
    pub async fn has_performance_benchmarks(&self) -> bool {
        match self.readme().await {
            Ok(readme) => {
                let lower = readme.to_lowercase();
                BENCHMARK_KEYWORDS.iter().any(|k| lower.contains(k))
            }
            Err(e) => {
                tracing::error!(model = %self.model_id, error = %e, "Error checking benchmarks");
                false
            }
        }
    }
}

#[async_trait]
impl ResourceHandler for ModelHandler {
    fn category(&self) -> Category {
        Category::Model
    }

    fn url(&self) -> &str {
        &self.url
    }

    async fn license_score(&self) -> f64 {
        if let Some(CachedValue::LicenseScore(score)) = self.cache.get(CacheKey::LicenseScore) {
            return score;
        }
        match self.readme().await {
            Ok(readme) => {
                let score = readme_license_score(&readme);
                self.cache
                    .insert(CacheKey::LicenseScore, CachedValue::LicenseScore(score));
                score
            }
            Err(e) => {
                tracing::warn!(model = %self.model_id, error = %e, "Could not fetch README.md");
                0.0
            }
        }
    }

    async fn documentation_score(&self) -> f64 {
        let readme = match self.readme().await {
            Ok(readme) => readme,
            Err(e) => {
                tracing::error!(model = %self.model_id, error = %e, "Error evaluating documentation");
                return 0.0;
            }
        };

        let lower = readme.to_lowercase();
        let mut score = 0.0;
        if readme.chars().count() > 500 {
            score += 0.3;
        }
        if lower.contains("usage") {
            score += 0.3;
        }
        if lower.contains("example") {
            score += 0.2;
        }
        if lower.contains("training") {
            score += 0.2;
        }
        f64::min(score, 1.0)
    }

    /// Approximated from download and like counts.
    async fn contributor_count(&self) -> u64 {
        let info = match self.info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(model = %self.model_id, error = %e, "Error fetching model metadata");
                return 1;
            }
        };
        contributors_from_popularity(info.downloads.unwrap_or(0), info.likes.unwrap_or(0))
    }
}

fn contributors_from_popularity(downloads: u64, likes: u64) -> u64 {
    if downloads >= 10_000 || likes >= 100 {
        10
    } else if downloads >= 1_000 || likes >= 20 {
        5
    } else if downloads >= 100 || likes >= 5 {
        2
    } else {
        1
    }
}

fn model_id_from_url(url: &str) -> Result<String, HandlerError> {
    let segments = path_segments(url)?;
    match segments.as_slice() {
        [] => Err(HandlerError::InvalidUrl {
            url: url.to_string(),
            reason: "missing model id".into(),
        }),
        [owner, name, ..] if !VIEW_SEGMENTS.contains(&name.as_str()) => {
            Ok(format!("{owner}/{name}"))
        }
        [name, ..] => Ok(name.clone()),
    }
}

pub(crate) fn display_name(model_id: &str) -> &str {
    model_id.rsplit('/').next().unwrap_or(model_id)
}
