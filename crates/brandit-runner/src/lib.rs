//! Query, match, and copy logic for the BrandIt launcher runner.
//!
//! The launcher sends every typed query to [`RunnerService::match_query`].
//! Queries that start with the trigger character are treated as a brand
//! lookup: the keyword after the trigger selects a template from the
//! [`ConfigStore`], the template is rendered with the typed brand, and a single
//! [`MatchResult`] is offered back. When the user picks it, the launcher echoes
//! the payload to [`RunnerService::run`], and the [`ActionExecutor`] copies the
//! text to the clipboard.
//!
//! No operation in this crate reports failure to the launcher. Template
//! loading falls back to the built-in document, and clipboard failures
//! degrade to the fallback sink and then to a log entry.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use brandit_runner::{
//!     ActionExecutor, BrandRunner, ConfigStore, FileTemplateSource, MatchEngine,
//!     RunnerService,
//! };
//!
//! let store = Arc::new(ConfigStore::new(FileTemplateSource::new(
//!     "/home/user/.config/brandIt/config.yaml",
//! )));
//! let runner = BrandRunner::new(
//!     Arc::clone(&store),
//!     MatchEngine::new(Arc::clone(&store), '!'),
//!     ActionExecutor::system(true),
//! );
//! let matches = runner.match_query("!github");
//! assert!(matches.len() <= 1);
//! ```

pub mod action;
pub mod command;
pub mod engine;
pub mod protocol;
pub mod store;

#[cfg(test)]
mod tests;

pub use self::action::{
    ActionExecutor, ClipboardError, ClipboardSink, CommandClipboard, CommandNotifier,
    CopyOutcome, FallbackReason, NotifyError, Notifier,
};
pub use self::command::{CommandError, CommandRunner, SystemCommandRunner};
pub use self::engine::{
    CUSTOM_RELEVANCE, DEFAULT_RELEVANCE, EXACT_MATCH_TYPE, MatchEngine, MatchResult,
};
pub use self::protocol::{
    ActionDescriptor, BrandRunner, INTERFACE_NAME, OBJECT_PATH, RunnerService, SERVICE_NAME,
};
pub use self::store::{ConfigStore, FileTemplateSource, TemplateLoadError, TemplateSource};
