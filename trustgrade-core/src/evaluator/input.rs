//! Batch input: one line per batch, comma-separated URLs.

use crate::error::EvalError;
use std::path::Path;

/// Split `text` into batches. Tokens are trimmed; empty tokens and blank lines are dropped.
pub fn parse_batches(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|batch| !batch.is_empty())
        .collect()
}

/// Read and parse a batch file.
pub async fn read_batches(path: &Path) -> Result<Vec<Vec<String>>, EvalError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            EvalError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EvalError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(parse_batches(&text))
}
