//! License acceptance policy shared by all resource handlers.
//!
//! A license is accepted when it is one of the common permissive or copyleft
//! licenses below. Identifiers from structured metadata must match exactly
//! (case-insensitive); free text is searched for whole-word phrases.

/// Accepted license identifiers and common names, lowercase.
const ACCEPTED_IDENTIFIERS: &[&str] = &[
    "mit",
    "mit license",
    "apache",
    "apache-2.0",
    "apache 2.0",
    "apache license",
    "bsd",
    "bsd-2-clause",
    "bsd-3-clause",
    "bsd license",
    "gpl-2.0",
    "gpl-2.0-only",
    "gpl-2.0-or-later",
    "gplv2",
    "gpl-3.0",
    "gpl-3.0-only",
    "gpl-3.0-or-later",
    "gplv3",
    "lgpl-2.1",
    "lgpl-2.1-only",
    "lgpl-2.1-or-later",
    "lgplv2.1",
    "lgpl-3.0",
    "lgpl-3.0-only",
    "lgpl-3.0-or-later",
    "lgplv3",
    "cc0",
    "cc0-1.0",
    "creative commons zero",
    "unlicense",
    "public domain",
];

/// Spelled-out variants that only appear in prose.
const FREE_TEXT_VARIANTS: &[&str] = &[
    "gpl v2",
    "gnu general public license version 2",
    "lgpl v2.1",
    "lgpl v3",
];

/// Score a structured license identifier: 1.0 if accepted, else 0.0.
pub fn identifier_score(identifier: &str) -> f64 {
    let normalized = identifier.trim().to_lowercase();
    if normalized.is_empty() {
        return 0.0;
    }
    if ACCEPTED_IDENTIFIERS.contains(&normalized.as_str()) {
        1.0
    } else {
        0.0
    }
}

/// Score free text: 1.0 if any accepted license is mentioned as a whole word.
pub fn free_text_score(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let mentioned = ACCEPTED_IDENTIFIERS
        .iter()
        .chain(FREE_TEXT_VARIANTS)
        .any(|phrase| contains_word(&lower, phrase));
    if mentioned { 1.0 } else { 0.0 }
}

fn contains_word(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Leading metadata block of a readme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatter {
    /// The readme does not open with a `---` block.
    Absent,
    /// A block exists; `licenses` is empty when it has no license field.
    Present { licenses: Vec<String> },
}

/// Extract the front-matter block and its license field(s).
pub fn front_matter(readme: &str) -> FrontMatter {
    let Some(rest) = readme.trim_start().strip_prefix("---") else {
        return FrontMatter::Absent;
    };
    let block = match rest.find("---") {
        Some(end) => &rest[..end],
        None => rest,
    };

    let licenses = match serde_yaml::from_str::<serde_yaml::Value>(block) {
        Ok(serde_yaml::Value::Mapping(map)) => map
            .iter()
            .filter(|(key, _)| {
                key.as_str()
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case("license"))
            })
            .flat_map(|(_, value)| yaml_strings(value))
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Front matter is not valid YAML, scanning lines");
            scan_license_lines(block)
        }
    };

    FrontMatter::Present { licenses }
}

fn yaml_strings(value: &serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::String(s) => vec![s.clone()],
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn scan_license_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case("license").then(|| {
                value
                    .trim()
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string()
            })
        })
        .filter(|value| !value.is_empty())
        .collect()
}

/// License score of a readme.
///
/// With front matter, only its license field counts (0.0 when missing).
/// Without front matter, the whole text is searched.
pub fn readme_license_score(readme: &str) -> f64 {
    match front_matter(readme) {
        FrontMatter::Absent => free_text_score(readme),
        FrontMatter::Present { licenses } => {
            if licenses.iter().any(|l| identifier_score(l) > 0.0) {
                1.0
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_score() {
        assert_eq!(identifier_score("MIT"), 1.0);
        assert_eq!(identifier_score(" apache-2.0 "), 1.0);
        assert_eq!(identifier_score("LGPL-2.1-or-later"), 1.0);
        assert_eq!(identifier_score("cc-by-nc-4.0"), 0.0);
        assert_eq!(identifier_score("llama2"), 0.0);
        assert_eq!(identifier_score(""), 0.0);
    }

    #[test]
    fn test_free_text_score_whole_words() {
        assert_eq!(free_text_score("Released under the MIT License."), 1.0);
        assert_eq!(free_text_score("Licensed: Apache 2.0"), 1.0);
        assert_eq!(free_text_score("This is in the public domain"), 1.0);
        assert_eq!(free_text_score("Please submit a commit"), 0.0);
        assert_eq!(free_text_score("Proprietary, all rights reserved"), 0.0);
        assert_eq!(free_text_score(""), 0.0);
    }

    #[test]
    fn test_front_matter_absent() {
        assert_eq!(front_matter("# Model\nSome text"), FrontMatter::Absent);
    }

    #[test]
    fn test_front_matter_license() {
        let readme = "---\nlicense: mit\ntags:\n- nlp\n---\n# Model";
        assert_eq!(
            front_matter(readme),
            FrontMatter::Present {
                licenses: vec!["mit".to_string()]
            }
        );
    }

    #[test]
    fn test_front_matter_license_sequence() {
        let readme = "---\nlicense:\n  - other\n  - apache-2.0\n---\n";
        assert_eq!(readme_license_score(readme), 1.0);
    }

    #[test]
    fn test_front_matter_without_license_scores_zero() {
        let readme = "---\ntags:\n- vision\n---\nReleased under the MIT license.";
        assert_eq!(
            front_matter(readme),
            FrontMatter::Present {
                licenses: Vec::new()
            }
        );
        assert_eq!(readme_license_score(readme), 0.0);
    }

    #[test]
    fn test_malformed_yaml_falls_back_to_line_scan() {
        let readme = "---\nlicense: \"bsd-3-clause\"\n  : broken: [\n---\n";
        assert_eq!(readme_license_score(readme), 1.0);
    }

    #[test]
    fn test_readme_without_front_matter_uses_text() {
        assert_eq!(readme_license_score("# Model\nLicense: BSD license"), 1.0);
        assert_eq!(readme_license_score("# Model\nNo license info"), 0.0);
    }

    #[test]
    fn test_unclosed_front_matter_block() {
        assert_eq!(readme_license_score("---\nlicense: gpl-3.0\n"), 1.0);
    }
}
