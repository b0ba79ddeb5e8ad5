//! Tracing subscriber setup.
//!
//! Level 0 installs no subscriber. Without a log file, records go to stderr
//! (stdout carries NDJSON). With one, JSON records are appended through a
//! non-blocking writer; the returned guard must live until exit.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use trustgrade_core::config::LoggingConfig;

/// Filter directive for a numeric level; `None` means silent.
pub fn directive_for_level(level: u8) -> Option<&'static str> {
    match level {
        0 => None,
        1 => Some("info"),
        _ => Some("debug"),
    }
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global subscriber for `config`.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let directive = directive_for_level(config.level)?;

    let file = config.file.as_deref().and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "Warning: Cannot write to log file '{}': {e}. Logging to stderr.",
                path.display()
            );
            None
        }
    });

    match file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(filter(directive));
            tracing_subscriber::registry().with(file_layer).init();
            Some(guard)
        }
        None => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter(directive));
            tracing_subscriber::registry().with(stderr_layer).init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directives() {
        assert_eq!(directive_for_level(0), None);
        assert_eq!(directive_for_level(1), Some("info"));
        assert_eq!(directive_for_level(2), Some("debug"));
        assert_eq!(directive_for_level(9), Some("debug"));
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("trustgrade.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_under_a_file_fails() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("trustgrade.log");
        assert!(open_log_file(&path).is_err());
    }
}
