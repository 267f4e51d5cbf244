//! Turns a typed query into at most one copy candidate.

use std::collections::BTreeMap;
use std::sync::Arc;

use brandit_config::PLACEHOLDER;
use serde::Serialize;
use tracing::debug;

use crate::store::ConfigStore;

const ENGINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::engine");

/// Launcher match type for an exact match.
pub const EXACT_MATCH_TYPE: i32 = 100;

/// Relevance of a match backed by a custom pattern.
pub const CUSTOM_RELEVANCE: f64 = 1.0;

/// Relevance of a match rendered from the default pattern.
pub const DEFAULT_RELEVANCE: f64 = 0.9;

const MATCH_ICON: &str = "edit-copy";
const MATCH_CATEGORY: &str = "Brand";
const DEFAULT_SUBTEXT: &str = "Default pattern";

/// A candidate offered back to the launcher.
///
/// Serialises as the positional tuple
/// `(payload, displayText, iconName, matchType, relevance, attributes)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult(
    String,
    String,
    String,
    i32,
    f64,
    BTreeMap<String, String>,
);

impl MatchResult {
    /// Rendered text handed back to `Run` when the match is picked.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.0
    }

    /// Label shown in the launcher.
    #[must_use]
    pub fn display_text(&self) -> &str {
        &self.1
    }

    /// Icon shown next to the label.
    #[must_use]
    pub fn icon_name(&self) -> &str {
        &self.2
    }

    /// Launcher match category.
    #[must_use]
    pub const fn match_type(&self) -> i32 {
        self.3
    }

    /// Ranking weight in `[0, 1]`.
    #[must_use]
    pub const fn relevance(&self) -> f64 {
        self.4
    }

    /// Extra properties (`subtext`, `category`).
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, String> {
        &self.5
    }
}

/// Parses queries and renders templates from the [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct MatchEngine {
    store: Arc<ConfigStore>,
    trigger: char,
}

impl MatchEngine {
    /// Creates an engine recognising queries that start with `trigger`.
    #[must_use]
    pub const fn new(store: Arc<ConfigStore>, trigger: char) -> Self {
        Self { store, trigger }
    }

    /// Trigger character this engine answers to.
    #[must_use]
    pub const fn trigger(&self) -> char {
        self.trigger
    }

    /// Matches `query`, returning `None` when it does not trigger.
    ///
    /// Template and relevance are taken from one document snapshot.
    #[must_use]
    pub fn find(&self, query: &str) -> Option<MatchResult> {
        let brand = self.brand_of(query)?;
        let config = self.store.ensure_loaded();
        let keyword = brand.to_lowercase();
        let custom = config.is_custom(&keyword);
        let rendered = config.template_for(&keyword).replace(PLACEHOLDER, brand);

        debug!(
            target: ENGINE_TARGET,
            brand,
            custom,
            rendered = %rendered,
            "query matched"
        );

        let subtext = if custom { brand } else { DEFAULT_SUBTEXT };
        let attributes = BTreeMap::from([
            ("subtext".to_owned(), subtext.to_owned()),
            ("category".to_owned(), MATCH_CATEGORY.to_owned()),
        ]);
        Some(MatchResult(
            rendered.clone(),
            format!("Copy \"{rendered}\""),
            MATCH_ICON.to_owned(),
            EXACT_MATCH_TYPE,
            if custom {
                CUSTOM_RELEVANCE
            } else {
                DEFAULT_RELEVANCE
            },
            attributes,
        ))
    }

    fn brand_of<'q>(&self, query: &'q str) -> Option<&'q str> {
        let remainder = query.strip_prefix(self.trigger)?;
        let brand = remainder.trim();
        (!brand.is_empty()).then_some(brand)
    }
}
