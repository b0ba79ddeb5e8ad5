//! Code repository handler.

use super::cache::{CacheKey, CachedValue, ResourceCache};
use super::{ResourceHandler, path_segments};
use crate::classifier::Category;
use crate::error::{HandlerError, HubError};
use crate::hub::{CodeHostClient, RepoInfo};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;

/// Handler for one source repository on the code host.
pub struct CodeHandler {
    url: String,
    repo_path: String,
    code_host: Arc<CodeHostClient>,
    cache: ResourceCache,
    reference_year: i32,
}

impl CodeHandler {
    pub fn new(url: &str, code_host: Arc<CodeHostClient>) -> Result<Self, HandlerError> {
        let repo_path = repo_path_from_url(url)?;
        Ok(Self {
            url: url.to_string(),
            repo_path,
            code_host,
            cache: ResourceCache::new(),
            reference_year: Utc::now().year(),
        })
    }

    /// Year against which "recently updated" is judged (this year or the one before).
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// `owner/repo`.
    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    pub async fn info(&self) -> Result<Arc<RepoInfo>, HubError> {
        if let Some(CachedValue::RepoInfo(info)) = self.cache.get(CacheKey::RepoInfo) {
            return Ok(info);
        }
        let info = Arc::new(self.code_host.repo_info(&self.repo_path).await?);
        self.cache
            .insert(CacheKey::RepoInfo, CachedValue::RepoInfo(info.clone()));
        Ok(info)
    }

    /// Quality from readme presence, stars, recent activity and issue tracking.
    pub async fn code_quality_score(&self) -> f64 {
        let info = match self.info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(repo = %self.repo_path, error = %e, "Error evaluating code quality");
                return 0.0;
            }
        };

        let mut score = 0.0;
        if info.readme() {
            score += 0.3;
        }
        score += match info.stars() {
            s if s > 100 => 0.4,
            s if s > 10 => 0.3,
            s if s > 0 => 0.2,
            _ => 0.0,
        };
        if info
            .updated_at
            .as_deref()
            .is_some_and(|ts| updated_recently(ts, self.reference_year))
        {
            score += 0.3;
        }
        if info.issues() {
            score += 0.2;
        }
        f64::min(score, 1.0)
    }

    /// Whether a code search finds evaluation, test or benchmark files.
    pub async fn has_evaluation_code(&self) -> bool {
        match self.code_host.search_evaluation_code(&self.repo_path).await {
            Ok(result) => result.total_count > 0,
            Err(e) => {
                tracing::error!(repo = %self.repo_path, error = %e, "Error checking evaluation code");
                false
            }
        }
    }
}

#[async_trait]
impl ResourceHandler for CodeHandler {
    fn category(&self) -> Category {
        Category::Code
    }

    fn url(&self) -> &str {
        &self.url
    }

    /// Repository licenses are not assessed.
    async fn license_score(&self) -> f64 {
        0.0
    }

    async fn documentation_score(&self) -> f64 {
        let info = match self.info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(repo = %self.repo_path, error = %e, "Error evaluating code documentation");
                return 0.0;
            }
        };
        let mut score = 0.0;
        if info.has_description() {
            score += 0.3;
        }
        if info.readme() {
            score += 0.4;
        }
        if info.wiki() {
            score += 0.2;
        }
        if info.has_homepage() {
            score += 0.1;
        }
        f64::min(score, 1.0)
    }

    async fn contributor_count(&self) -> u64 {
        match self.code_host.contributors(&self.repo_path).await {
            Ok(list) => (list.len() as u64).max(1),
            Err(e) => {
                tracing::error!(repo = %self.repo_path, error = %e, "Error getting contributor count");
                1
            }
        }
    }
}

fn updated_recently(timestamp: &str, reference_year: i32) -> bool {
    let recent = [reference_year, reference_year - 1];
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => recent.contains(&ts.year()),
        Err(_) => recent.iter().any(|y| timestamp.contains(&y.to_string())),
    }
}

fn repo_path_from_url(url: &str) -> Result<String, HandlerError> {
    let segments = path_segments(url)?;
    match segments.as_slice() {
        [owner, repo, ..] => {
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            Ok(format!("{owner}/{repo}"))
        }
        _ => Err(HandlerError::InvalidUrl {
            url: url.to_string(),
            reason: "expected owner/repo".into(),
        }),
    }
}
