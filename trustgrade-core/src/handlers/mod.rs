//! Resource handlers, one per external artifact (model, dataset or code repository).
//!
//! Every handler implements [`ResourceHandler`], the capability set shared by
//! all variants, plus its own variant-specific queries. Handler methods never
//! fail: network, decode, and timeout errors are logged and converted to
//! conservative defaults.

pub mod cache;
pub mod code;
pub mod dataset;
pub mod group;
pub mod license;
pub mod model;

pub use cache::{CacheKey, CachedValue, ResourceCache};
pub use code::CodeHandler;
pub use dataset::DatasetHandler;
pub use group::ResourceGroup;
pub use model::ModelHandler;

use crate::classifier::Category;
use crate::error::HandlerError;
use async_trait::async_trait;
use url::Url;

/// Hub page segments that follow an id rather than form part of it.
pub(crate) const VIEW_SEGMENTS: &[&str] = &["tree", "blob", "resolve", "viewer"];

/// Capability set shared by every resource variant.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Category this handler scores.
    fn category(&self) -> Category;

    /// Source URL the handler was built from.
    fn url(&self) -> &str;

    /// License compatibility in [0, 1].
    async fn license_score(&self) -> f64;

    /// Documentation quality in [0, 1].
    async fn documentation_score(&self) -> f64;

    /// Approximate contributor count, at least 1.
    async fn contributor_count(&self) -> u64;
}

/// Non-empty path segments of an artifact URL.
pub(crate) fn path_segments(url: &str) -> Result<Vec<String>, HandlerError> {
    let parsed = Url::parse(url.trim()).map_err(|e| HandlerError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let segments: Vec<String> = parsed
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_skip_empty() {
        let segments = path_segments("https://huggingface.co//org/model/").unwrap();
        assert_eq!(segments, vec!["org", "model"]);
    }

    #[test]
    fn test_path_segments_invalid_url() {
        let err = path_segments("huggingface.co/org/model").unwrap_err();
        assert!(matches!(err, HandlerError::InvalidUrl { .. }));
    }
}
