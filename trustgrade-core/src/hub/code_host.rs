//! Code host REST client.

use super::{Credential, fetch_json, trim_base};
use crate::config::CodeHostConfig;
use crate::error::HubError;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Repository metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoInfo {
    pub has_readme: Option<bool>,
    pub stargazers_count: Option<u64>,
    pub updated_at: Option<String>,
    pub has_issues: Option<bool>,
    pub description: Option<String>,
    pub has_wiki: Option<bool>,
    pub homepage: Option<String>,
}

impl RepoInfo {
    pub fn readme(&self) -> bool {
        self.has_readme.unwrap_or(false)
    }

    pub fn issues(&self) -> bool {
        self.has_issues.unwrap_or(false)
    }

    pub fn wiki(&self) -> bool {
        self.has_wiki.unwrap_or(false)
    }

    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    pub fn has_homepage(&self) -> bool {
        self.homepage.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// One element of `GET /repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
    pub login: Option<String>,
    pub contributions: Option<u64>,
}

/// Code search summary from `GET /search/code`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub total_count: u64,
}

/// Client for the code host REST API.
pub struct CodeHostClient {
    transport: Arc<dyn Transport>,
    api_base_url: String,
    credential: Credential,
}

impl CodeHostClient {
    pub fn new(transport: Arc<dyn Transport>, config: &CodeHostConfig) -> Self {
        Self {
            transport,
            api_base_url: trim_base(&config.api_base_url),
            credential: Credential::new(config.token.clone()),
        }
    }

    pub fn repo_url(&self, repo_path: &str) -> String {
        format!("{}/repos/{}", self.api_base_url, repo_path)
    }

    pub fn contributors_url(&self, repo_path: &str) -> String {
        format!("{}/repos/{}/contributors", self.api_base_url, repo_path)
    }

    pub fn evaluation_search_url(&self, repo_path: &str) -> String {
        format!(
            "{}/search/code?q=repo:{}+evaluation+test+benchmark",
            self.api_base_url, repo_path
        )
    }

    pub async fn repo_info(&self, repo_path: &str) -> Result<RepoInfo, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.repo_url(repo_path),
        )
        .await
    }

    pub async fn contributors(&self, repo_path: &str) -> Result<Vec<Contributor>, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.contributors_url(repo_path),
        )
        .await
    }

    pub async fn search_evaluation_code(&self, repo_path: &str) -> Result<SearchResult, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.evaluation_search_url(repo_path),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InMemoryTransport;
    use serde_json::json;

    fn client(transport: Arc<InMemoryTransport>) -> CodeHostClient {
        CodeHostClient::new(
            transport,
            &CodeHostConfig {
                api_base_url: "http://code.test".into(),
                token: None,
            },
        )
    }

    #[tokio::test]
    async fn test_repo_info_decodes() {
        let transport = Arc::new(InMemoryTransport::new());
        transport.respond_json(
            "http://code.test/repos/org/repo",
            &json!({
                "stargazers_count": 12,
                "has_issues": true,
                "homepage": null,
                "description": "Training code",
            }),
        );
        let info = client(transport).repo_info("org/repo").await.unwrap();
        assert_eq!(info.stars(), 12);
        assert!(info.issues());
        assert!(!info.readme());
        assert!(!info.has_homepage());
        assert!(info.has_description());
    }

    #[tokio::test]
    async fn test_search_url_is_scoped_to_repo() {
        let transport = Arc::new(InMemoryTransport::new());
        let code = client(transport.clone());
        let url = code.evaluation_search_url("org/repo");
        assert_eq!(
            url,
            "http://code.test/search/code?q=repo:org/repo+evaluation+test+benchmark"
        );
        transport.respond_json(url, &json!({"total_count": 3, "items": []}));
        let result = code.search_evaluation_code("org/repo").await.unwrap();
        assert_eq!(result.total_count, 3);
    }

    #[tokio::test]
    async fn test_contributors_list() {
        let transport = Arc::new(InMemoryTransport::new());
        transport.respond_json(
            "http://code.test/repos/org/repo/contributors",
            &json!([{"login": "a"}, {"login": "b"}, {"login": "c"}]),
        );
        let list = client(transport).contributors("org/repo").await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].login.as_deref(), Some("a"));
    }
}
