//! URL classification: maps artifact URLs to resource categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

const HUB_DOMAIN: &str = "huggingface.co";
const CODE_HOST_DOMAIN: &str = "github.com";
const DATASET_PREFIX: &str = "datasets";

/// Category of an artifact URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Model,
    Dataset,
    Code,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Model,
        Category::Dataset,
        Category::Code,
        Category::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Model => "MODEL",
            Category::Dataset => "DATASET",
            Category::Code => "CODE",
            Category::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a single URL by host and leading path segment.
///
/// Malformed URLs classify as [`Category::Unknown`].
pub fn classify(url: &str) -> Category {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return Category::Unknown;
    };
    let Some(host) = parsed.host_str() else {
        return Category::Unknown;
    };
    let host = host.to_ascii_lowercase();

    if host.contains(HUB_DOMAIN) {
        let first = parsed
            .path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()));
        match first {
            Some(segment) if segment.eq_ignore_ascii_case(DATASET_PREFIX) => Category::Dataset,
            _ => Category::Model,
        }
    } else if host.contains(CODE_HOST_DOMAIN) {
        Category::Code
    } else {
        Category::Unknown
    }
}

/// Group URLs by category, preserving input order within each category.
///
/// Every category has an entry, possibly empty.
pub fn group<I, S>(urls: I) -> BTreeMap<Category, Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grouped: BTreeMap<Category, Vec<String>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

    for url in urls {
        let url = url.as_ref();
        grouped
            .entry(classify(url))
            .or_default()
            .push(url.to_string());
    }

    grouped
}
