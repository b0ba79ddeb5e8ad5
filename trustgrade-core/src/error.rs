//! Error types for the trustgrade evaluation engine.
//!
//! Uses `thiserror` for structured error variants. Most of these never leave
//! the engine: handlers, metrics, and the evaluator each convert failures into
//! degraded scores at their own boundary and only log the error.

use std::path::PathBuf;

/// Top-level error type for the trustgrade core library.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("Hub error: {0}")]
    Hub(#[from] HubError),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the model hub and code host APIs.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Authentication rejected by {url}")]
    Unauthorized { url: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("HTTP client setup failed: {message}")]
    ClientBuild { message: String },
}

impl HubError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Errors when building a resource handler from an artifact URL.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Invalid artifact URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Lookup for {resource} failed: {source}")]
    Lookup {
        resource: String,
        #[source]
        source: HubError,
    },
}

/// Errors raised while a metric computes its score.
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("Metric '{metric}' failed: {message}")]
    Failed { metric: String, message: String },

    #[error("Metric '{metric}' task aborted: {message}")]
    Aborted { metric: String, message: String },
}

/// Errors reading batch input.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("URL file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read URL file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A type alias for results using the top-level `TrustError`.
pub type Result<T> = std::result::Result<T, TrustError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_hub() {
        let err = TrustError::Hub(HubError::Timeout {
            url: "https://api.github.com/repos/a/b".into(),
            timeout_secs: 10,
        });
        assert_eq!(
            err.to_string(),
            "Hub error: Request to https://api.github.com/repos/a/b timed out after 10s"
        );
    }

    #[test]
    fn test_error_display_handler() {
        let err = TrustError::Handler(HandlerError::InvalidUrl {
            url: "https://github.com/solo".into(),
            reason: "expected owner/repo".into(),
        });
        assert_eq!(
            err.to_string(),
            "Handler error: Invalid artifact URL 'https://github.com/solo': expected owner/repo"
        );
    }

    #[test]
    fn test_error_display_eval() {
        let err = TrustError::Eval(EvalError::FileNotFound {
            path: PathBuf::from("/missing/urls.txt"),
        });
        assert_eq!(
            err.to_string(),
            "Evaluation error: URL file not found: /missing/urls.txt"
        );
    }

    #[test]
    fn test_hub_error_is_timeout() {
        assert!(
            HubError::Timeout {
                url: "u".into(),
                timeout_secs: 1
            }
            .is_timeout()
        );
        assert!(
            !HubError::Status {
                url: "u".into(),
                status: 500
            }
            .is_timeout()
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrustError = io_err.into();
        assert!(matches!(err, TrustError::Io(_)));
    }
}
