//! Configuration system for trustgrade.
//!
//! Uses `figment` for layered configuration: defaults -> config files -> environment.
//! Configuration is loaded from `~/.config/trustgrade/config.toml` and/or
//! `.trustgrade/config.toml` in the workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustConfig {
    /// Model/dataset hub settings.
    #[serde(default)]
    pub hub: HubConfig,
    /// Code hosting platform settings.
    #[serde(default)]
    pub code_host: CodeHostConfig,
    /// Shared HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Orchestrator settings.
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model/dataset hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Base URL for API and raw file requests.
    #[serde(default = "default_hub_url")]
    pub base_url: String,
    /// Bearer token (read from `HF_API_TOKEN` when unset).
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: default_hub_url(),
            token: None,
        }
    }
}

fn default_hub_url() -> String {
    "https://huggingface.co".to_string()
}

/// Code host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeHostConfig {
    /// REST API base URL.
    #[serde(default = "default_code_host_url")]
    pub api_base_url: String,
    /// Bearer token (read from `GITHUB_TOKEN` when unset).
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for CodeHostConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_code_host_url(),
            token: None,
        }
    }
}

fn default_code_host_url() -> String {
    "https://api.github.com".to_string()
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    concat!("trustgrade/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Evaluator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Maximum metrics computed concurrently for one model.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl EvaluatorConfig {
    /// Worker width, never below one.
    pub fn worker_width(&self) -> usize {
        self.max_workers.max(1)
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

fn default_max_workers() -> usize {
    4
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 0 = silent, 1 = info, 2 or more = debug.
    #[serde(default)]
    pub level: u8,
    /// Append log records to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Legacy variables (`LOG_LEVEL`, `LOG_FILE`, `HF_API_TOKEN`, `GITHUB_TOKEN`)
/// 2. Environment variables (prefixed with `TRUSTGRADE_`)
/// 3. Explicit config file
/// 4. Workspace-local config (`.trustgrade/config.toml`)
/// 5. User config (`~/.config/trustgrade/config.toml`)
/// 6. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<TrustConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(TrustConfig::default()));

    if let Some(config_dir) = directories::ProjectDirs::from("dev", "trustgrade", "trustgrade") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".trustgrade").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }

    // TRUSTGRADE_EVALUATOR__MAX_WORKERS, TRUSTGRADE_HTTP__TIMEOUT_SECS, etc.
    figment = figment.merge(Env::prefixed("TRUSTGRADE_").split("__"));
    figment = figment.merge(legacy_env());

    figment.extract().map_err(Box::new)
}

/// Unprefixed variables honored for compatibility with existing deployments.
fn legacy_env() -> Env {
    Env::raw()
        .only(&["LOG_LEVEL", "LOG_FILE", "HF_API_TOKEN", "GITHUB_TOKEN"])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "log_level" => "logging.level".into(),
            "log_file" => "logging.file".into(),
            "hf_api_token" => "hub.token".into(),
            "github_token" => "code_host.token".into(),
            other => other.to_string().into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrustConfig::default();
        assert_eq!(config.hub.base_url, "https://huggingface.co");
        assert_eq!(config.code_host.api_base_url, "https://api.github.com");
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.evaluator.max_workers, 4);
        assert_eq!(config.logging.level, 0);
        assert!(config.logging.file.is_none());
        assert!(config.hub.token.is_none());
    }

    #[test]
    fn test_worker_width_is_clamped() {
        let config = EvaluatorConfig { max_workers: 0 };
        assert_eq!(config.worker_width(), 1);
        let config = EvaluatorConfig { max_workers: 8 };
        assert_eq!(config.worker_width(), 8);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = TrustConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: TrustConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.http.timeout_secs, config.http.timeout_secs);
        assert_eq!(parsed.hub.base_url, config.hub.base_url);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: TrustConfig = toml::from_str("[evaluator]\nmax_workers = 2\n").unwrap();
        assert_eq!(parsed.evaluator.max_workers, 2);
        assert_eq!(parsed.http.timeout_secs, 10);
    }

    #[test]
    fn test_load_config_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trustgrade.toml");
        std::fs::write(
            &path,
            "[http]\ntimeout_secs = 3\n\n[hub]\nbase_url = \"http://hub.local\"\n",
        )
        .unwrap();

        let config = load_config(None, Some(&path)).unwrap();
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.hub.base_url, "http://hub.local");
    }

    #[test]
    fn test_load_config_workspace_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".trustgrade")).unwrap();
        std::fs::write(
            dir.path().join(".trustgrade").join("config.toml"),
            "[evaluator]\nmax_workers = 6\n",
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.evaluator.max_workers, 6);
    }
}
