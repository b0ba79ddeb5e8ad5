//! API clients for the model/dataset hub and the code host.
//!
//! Each client wraps a shared [`Transport`], builds endpoint URLs from its
//! configured base, attaches the optional bearer token, and decodes typed
//! responses.

pub mod code_host;
pub mod model_hub;

pub use code_host::{CodeHostClient, Contributor, RepoInfo, SearchResult};
pub use model_hub::{DatasetInfo, HubClient, ModelInfo, TreeEntry};

use crate::config::TrustConfig;
use crate::error::HubError;
use crate::transport::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Both API clients over one shared transport.
#[derive(Clone)]
pub struct ApiClients {
    pub hub: Arc<HubClient>,
    pub code_host: Arc<CodeHostClient>,
}

impl ApiClients {
    pub fn new(transport: Arc<dyn Transport>, config: &TrustConfig) -> Self {
        Self {
            hub: Arc::new(HubClient::new(transport.clone(), &config.hub)),
            code_host: Arc::new(CodeHostClient::new(transport, &config.code_host)),
        }
    }
}

/// Optional bearer credential forwarded on every request.
#[derive(Debug, Clone)]
pub(crate) struct Credential {
    token: Option<String>,
}

impl Credential {
    pub(crate) fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Issue a GET and return the body of a 2xx response.
///
/// A 401 fails only this request. The credential is kept for the next one.
pub(crate) async fn fetch_text(
    transport: &dyn Transport,
    credential: &Credential,
    url: String,
) -> Result<String, HubError> {
    let request = ApiRequest::get(url.clone()).with_bearer(credential.token());
    let response = transport.get(request).await?;

    if response.is_success() {
        return Ok(response.body);
    }
    if response.status == 401 {
        tracing::warn!(url = %url, "Request unauthorized, continuing without this resource");
        return Err(HubError::Unauthorized { url });
    }
    Err(HubError::Status {
        url,
        status: response.status,
    })
}

/// Issue a GET and decode a JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    credential: &Credential,
    url: String,
) -> Result<T, HubError> {
    let body = fetch_text(transport, credential, url.clone()).await?;
    serde_json::from_str(&body).map_err(|e| HubError::Decode {
        url,
        message: e.to_string(),
    })
}

/// Strip a trailing slash so endpoint paths join cleanly.
pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
