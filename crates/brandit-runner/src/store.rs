//! Template document storage with wholesale reload.
//!
//! The [`ConfigStore`] owns the current [`TemplateConfig`] behind an
//! `RwLock<Option<Arc<_>>>`. A reload builds the new document off-lock and
//! swaps the `Arc` in a single write, so readers observe either the previous
//! document or the new one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use brandit_config::TemplateConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

const STORE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::store");

/// Failures while reading the template document.
///
/// These never leave the store: [`ConfigStore::load`] logs them and falls back
/// to [`TemplateConfig::default`].
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    /// The document does not exist.
    #[error("template document '{path}' not found")]
    Missing {
        /// Location that was checked.
        path: PathBuf,
    },
    /// The document exists but could not be read.
    #[error("failed to read template document '{path}': {source}")]
    Read {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The document was read but is not a valid template document.
    #[error("failed to parse template document '{path}': {source}")]
    Parse {
        /// Location that was parsed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: brandit_config::TemplateParseError,
    },
}

/// Origin of the template document.
pub trait TemplateSource: Send + Sync {
    /// Human-readable location used in log entries.
    fn describe(&self) -> String;

    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateLoadError`] when the document is missing,
    /// unreadable, or malformed.
    fn load(&self) -> Result<TemplateConfig, TemplateLoadError>;
}

/// Reads the YAML template document from a fixed path.
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSource for FileTemplateSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<TemplateConfig, TemplateLoadError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TemplateLoadError::Missing {
                    path: self.path.clone(),
                }
            } else {
                TemplateLoadError::Read {
                    path: self.path.clone(),
                    source: Arc::new(source),
                }
            }
        })?;
        TemplateConfig::from_yaml_str(&contents).map_err(|source| TemplateLoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Single owner of the current template document.
pub struct ConfigStore {
    source: Box<dyn TemplateSource>,
    current: RwLock<Option<Arc<TemplateConfig>>>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ConfigStore")
            .field("source", &self.source.describe())
            .field("loaded", &self.snapshot().is_some())
            .finish()
    }
}

impl ConfigStore {
    /// Creates an empty store; nothing is read until the first load.
    #[must_use]
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(None),
        }
    }

    /// Reads the document, substituting the built-in default on any failure.
    ///
    /// The stored document is left untouched; see [`Self::reload`].
    #[must_use]
    pub fn load(&self) -> Arc<TemplateConfig> {
        let location = self.source.describe();
        match self.source.load() {
            Ok(config) => {
                info!(
                    target: STORE_TARGET,
                    source = %location,
                    patterns = config.patterns().len(),
                    "loaded template document"
                );
                Arc::new(config)
            }
            Err(TemplateLoadError::Missing { .. }) => {
                info!(
                    target: STORE_TARGET,
                    source = %location,
                    "template document not found, using built-in default"
                );
                Arc::new(TemplateConfig::default())
            }
            Err(error) => {
                warn!(
                    target: STORE_TARGET,
                    source = %location,
                    %error,
                    "template document unusable, using built-in default"
                );
                Arc::new(TemplateConfig::default())
            }
        }
    }

    /// Loads the document and replaces the stored one in a single swap.
    pub fn reload(&self) -> Arc<TemplateConfig> {
        let fresh = self.load();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&fresh));
        fresh
    }

    /// Current document, loading it first if the store was never filled.
    pub fn ensure_loaded(&self) -> Arc<TemplateConfig> {
        if let Some(config) = self.snapshot() {
            return config;
        }
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(config) = current.as_ref() {
            return Arc::clone(config);
        }
        debug!(target: STORE_TARGET, "template document not loaded yet, loading now");
        let fresh = self.load();
        *current = Some(Arc::clone(&fresh));
        fresh
    }

    /// Current document, if one has been loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<TemplateConfig>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    /// Template registered for `keyword` (any case), or the default template.
    pub fn resolve(&self, keyword: &str) -> String {
        self.ensure_loaded().template_for(keyword).to_owned()
    }
}
