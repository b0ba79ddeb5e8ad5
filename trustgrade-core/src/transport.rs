//! HTTP transport seam shared by the hub and code host clients.
//!
//! [`HttpTransport`] performs single-attempt requests with a per-request
//! timeout. [`InMemoryTransport`] answers from a canned table.

use crate::config::HttpConfig;
use crate::error::HubError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// An outgoing GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }
}

/// A response with its status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests on behalf of the API clients.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, HubError>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, HubError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| HubError::ClientBuild {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, HubError> {
        let mut builder = self.client.get(&request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HubError::Timeout {
                    url: request.url.clone(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                HubError::Request {
                    url: request.url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HubError::Timeout {
                    url: request.url.clone(),
                    timeout_secs: self.timeout_secs,
                }
            } else {
                HubError::Decode {
                    url: request.url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(ApiResponse { status, body })
    }
}

/// Canned outcome for one URL.
#[derive(Debug, Clone)]
pub enum CannedReply {
    Respond(ApiResponse),
    Timeout,
    ConnectionError(String),
}

/// Transport answering from an in-memory table keyed by exact URL.
///
/// Unregistered URLs answer 404. Every request is recorded.
#[derive(Default)]
pub struct InMemoryTransport {
    replies: Mutex<HashMap<String, CannedReply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, url: impl Into<String>, reply: CannedReply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), reply);
    }

    /// Register a 200 response with a JSON body.
    pub fn respond_json(&self, url: impl Into<String>, body: &serde_json::Value) {
        self.insert(url, CannedReply::Respond(ApiResponse::ok(body.to_string())));
    }

    /// Register a 200 response with a text body.
    pub fn respond_text(&self, url: impl Into<String>, body: impl Into<String>) {
        self.insert(url, CannedReply::Respond(ApiResponse::ok(body)));
    }

    pub fn respond_status(&self, url: impl Into<String>, status: u16) {
        self.insert(url, CannedReply::Respond(ApiResponse::status(status)));
    }

    pub fn time_out(&self, url: impl Into<String>) {
        self.insert(url, CannedReply::Timeout);
    }

    /// Fail requests for `url` as if the connection could not be made.
    pub fn connection_error(&self, url: impl Into<String>, message: impl Into<String>) {
        self.insert(url, CannedReply::ConnectionError(message.into()));
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, HubError> {
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&request.url)
            .cloned();
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        match reply {
            Some(CannedReply::Respond(response)) => Ok(response),
            Some(CannedReply::Timeout) => Err(HubError::Timeout {
                url,
                timeout_secs: 0,
            }),
            Some(CannedReply::ConnectionError(message)) => Err(HubError::Request { url, message }),
            None => Ok(ApiResponse::status(404)),
        }
    }
}
