//! The five launcher operations and the runner that implements them.
//!
//! [`RunnerService`] is the seam the daemon dispatches onto. None of its
//! operations can fail: a query that does not trigger yields no matches, and
//! copy failures end in a log entry.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::action::ActionExecutor;
use crate::engine::{MatchEngine, MatchResult};
use crate::store::ConfigStore;

const PROTOCOL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::protocol");

/// Well-known bus name of the runner.
pub const SERVICE_NAME: &str = "org.kde.BrandIt";

/// Object path the runner is exported at.
pub const OBJECT_PATH: &str = "/runner";

/// Interface implemented by launcher runners.
pub const INTERFACE_NAME: &str = "org.kde.krunner1";

const COPY_ACTION_ID: &str = "copy";
const COPY_ACTION_LABEL: &str = "Copy to clipboard";
const COPY_ACTION_ICON: &str = "edit-copy";

/// An action offered on every match, serialised as `(id, label, iconName)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor(String, String, String);

impl ActionDescriptor {
    /// The single copy action.
    #[must_use]
    pub fn copy() -> Self {
        Self(
            COPY_ACTION_ID.to_owned(),
            COPY_ACTION_LABEL.to_owned(),
            COPY_ACTION_ICON.to_owned(),
        )
    }

    /// Identifier echoed back to `Run`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Label shown in the launcher.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.1
    }

    /// Icon shown next to the label.
    #[must_use]
    pub fn icon_name(&self) -> &str {
        &self.2
    }
}

/// Operations exposed to the launcher.
pub trait RunnerService {
    /// Matches a typed query, returning zero or one candidate.
    fn match_query(&self, query: &str) -> Vec<MatchResult>;

    /// Actions available on every match.
    fn actions(&self) -> Vec<ActionDescriptor>;

    /// Runs the picked match. `data` is the match payload.
    fn run(&self, data: &str, action_id: &str);

    /// Called when the launcher closes.
    fn teardown(&self);

    /// Re-reads the template document.
    fn reload_config(&self);
}

/// The brand runner: template matching plus clipboard copy.
#[derive(Debug)]
pub struct BrandRunner {
    store: Arc<ConfigStore>,
    engine: MatchEngine,
    executor: ActionExecutor,
}

impl BrandRunner {
    /// Assembles a runner. `engine` should read from `store`.
    #[must_use]
    pub const fn new(store: Arc<ConfigStore>, engine: MatchEngine, executor: ActionExecutor) -> Self {
        Self {
            store,
            engine,
            executor,
        }
    }
}

impl RunnerService for BrandRunner {
    fn match_query(&self, query: &str) -> Vec<MatchResult> {
        let matches: Vec<_> = self.engine.find(query).into_iter().collect();
        info!(
            target: PROTOCOL_TARGET,
            query,
            matches = matches.len(),
            "match"
        );
        matches
    }

    fn actions(&self) -> Vec<ActionDescriptor> {
        info!(target: PROTOCOL_TARGET, "actions");
        vec![ActionDescriptor::copy()]
    }

    fn run(&self, data: &str, action_id: &str) {
        info!(target: PROTOCOL_TARGET, action_id, "run");
        let outcome = self.executor.run(data);
        debug!(target: PROTOCOL_TARGET, ?outcome, "run finished");
    }

    fn teardown(&self) {
        info!(target: PROTOCOL_TARGET, "teardown");
    }

    fn reload_config(&self) {
        let config = self.store.reload();
        info!(
            target: PROTOCOL_TARGET,
            patterns = config.patterns().len(),
            "template document reloaded"
        );
    }
}
