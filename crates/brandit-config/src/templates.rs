//! The YAML template document mapping keywords to copy templates.
//!
//! ```yaml
//! default_pattern: ":{brand}: {brand}"
//! patterns:
//!   github: "gh/{brand}"
//! ```
//!
//! Keywords are folded to lowercase when the document is built so lookups
//! only ever compare lowercase keys.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Token replaced by the typed brand when a template is rendered.
pub const PLACEHOLDER: &str = "{brand}";

/// Template used when no custom pattern matches.
pub const DEFAULT_PATTERN: &str = ":{brand}: {brand}";

/// Keyword-to-template mapping plus the fallback template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    default_pattern: String,
    patterns: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawTemplateDocument {
    #[serde(default)]
    default_pattern: Option<String>,
    #[serde(default)]
    patterns: Option<BTreeMap<String, String>>,
}

/// Raised when the template document does not match the expected schema.
#[derive(Debug, Error)]
pub enum TemplateParseError {
    /// YAML syntax or schema violation.
    #[error("invalid template document: {message}")]
    Invalid {
        /// Parser diagnostic.
        message: String,
    },
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_PATTERN.to_owned(),
            patterns: BTreeMap::new(),
        }
    }
}

impl TemplateConfig {
    /// Builds a document, folding every keyword to lowercase.
    ///
    /// When two keywords collide after folding, the one that was already
    /// lowercase wins; otherwise the first in sorted order is kept.
    #[must_use]
    pub fn new<K, V>(default_pattern: impl Into<String>, patterns: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let sorted: BTreeMap<String, String> = patterns
            .into_iter()
            .map(|(keyword, template)| (keyword.into(), template.into()))
            .collect();
        Self {
            default_pattern: default_pattern.into(),
            patterns: fold_keywords(sorted),
        }
    }

    /// Parses the YAML document.
    ///
    /// A blank document, a missing `default_pattern`, or a missing or `null`
    /// `patterns` entry all fall back to the built-in values for that part.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateParseError::Invalid`] for malformed YAML or values of
    /// the wrong type.
    pub fn from_yaml_str(input: &str) -> Result<Self, TemplateParseError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: Option<RawTemplateDocument> =
            serde_saphyr::from_str(input).map_err(|error| TemplateParseError::Invalid {
                message: error.to_string(),
            })?;
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        Ok(Self::new(
            raw.default_pattern
                .unwrap_or_else(|| DEFAULT_PATTERN.to_owned()),
            raw.patterns.unwrap_or_default(),
        ))
    }

    /// Fallback template.
    #[must_use]
    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// Custom templates keyed by lowercase keyword.
    #[must_use]
    pub fn patterns(&self) -> &BTreeMap<String, String> {
        &self.patterns
    }

    /// Whether `keyword` has a custom template, ignoring case.
    #[must_use]
    pub fn is_custom(&self, keyword: &str) -> bool {
        self.patterns.contains_key(&keyword.to_lowercase())
    }

    /// Template for `keyword`, ignoring case, or the default template.
    #[must_use]
    pub fn template_for(&self, keyword: &str) -> &str {
        self.patterns
            .get(&keyword.to_lowercase())
            .map_or(self.default_pattern.as_str(), String::as_str)
    }
}

fn fold_keywords(sorted: BTreeMap<String, String>) -> BTreeMap<String, String> {
    let (lowercase, mixed): (Vec<_>, Vec<_>) = sorted
        .into_iter()
        .partition(|(keyword, _)| *keyword == keyword.to_lowercase());
    let mut folded = BTreeMap::new();
    for (keyword, template) in lowercase.into_iter().chain(mixed) {
        folded.entry(keyword.to_lowercase()).or_insert(template);
    }
    folded
}
