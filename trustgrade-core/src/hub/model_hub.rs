//! Model/dataset hub client.

use super::{Credential, fetch_json, fetch_text, trim_base};
use crate::config::HubConfig;
use crate::error::HubError;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Model metadata from `GET /api/models/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub downloads: Option<u64>,
    pub likes: Option<u64>,
    pub tags: Vec<String>,
    #[serde(rename = "cardData")]
    pub card_data: Option<serde_json::Value>,
}

/// One entry of `GET /api/models/{id}/tree/main`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeEntry {
    pub path: Option<String>,
    pub size: Option<u64>,
}

/// Dataset metadata from `GET /api/datasets/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetInfo {
    pub downloads: Option<u64>,
    pub tags: Vec<String>,
    #[serde(rename = "cardData")]
    pub card_data: Option<serde_json::Value>,
    pub siblings: Vec<serde_json::Value>,
    pub description: Option<String>,
}

impl DatasetInfo {
    /// Card metadata is present and not an empty object.
    pub fn has_card_data(&self) -> bool {
        is_populated(self.card_data.as_ref())
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.is_empty())
    }
}

pub(crate) fn is_populated(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Object(map)) => !map.is_empty(),
        Some(serde_json::Value::Array(items)) => !items.is_empty(),
        Some(serde_json::Value::String(s)) => !s.is_empty(),
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Number(_)) => true,
    }
}

/// Client for the model/dataset hub API and raw file endpoint.
pub struct HubClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    credential: Credential,
}

impl HubClient {
    pub fn new(transport: Arc<dyn Transport>, config: &HubConfig) -> Self {
        Self {
            transport,
            base_url: trim_base(&config.base_url),
            credential: Credential::new(config.token.clone()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model_info_url(&self, model_id: &str) -> String {
        format!("{}/api/models/{}", self.base_url, model_id)
    }

    pub fn model_tree_url(&self, model_id: &str) -> String {
        format!("{}/api/models/{}/tree/main", self.base_url, model_id)
    }

    pub fn readme_url(&self, model_id: &str) -> String {
        format!("{}/{}/raw/main/README.md", self.base_url, model_id)
    }

    pub fn dataset_info_url(&self, dataset_id: &str) -> String {
        format!("{}/api/datasets/{}", self.base_url, dataset_id)
    }

    pub async fn model_info(&self, model_id: &str) -> Result<ModelInfo, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.model_info_url(model_id),
        )
        .await
    }

    pub async fn model_tree(&self, model_id: &str) -> Result<Vec<TreeEntry>, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.model_tree_url(model_id),
        )
        .await
    }

    pub async fn model_readme(&self, model_id: &str) -> Result<String, HubError> {
        fetch_text(
            self.transport.as_ref(),
            &self.credential,
            self.readme_url(model_id),
        )
        .await
    }

    pub async fn dataset_info(&self, dataset_id: &str) -> Result<DatasetInfo, HubError> {
        fetch_json(
            self.transport.as_ref(),
            &self.credential,
            self.dataset_info_url(dataset_id),
        )
        .await
    }
}
