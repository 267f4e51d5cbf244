//! Copying a rendered string to the clipboard.
//!
//! [`ActionExecutor::run`] tries the primary [`ClipboardSink`] first. When
//! the primary is missing or fails, the fallback sink is tried once. A
//! successful primary copy raises a notification if a [`Notifier`] is
//! configured. Nothing in this module returns an error to the caller; every
//! failure ends in a log entry and a [`CopyOutcome`].

mod sinks;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

pub use self::sinks::{CommandClipboard, CommandNotifier};
use crate::command::{CommandError, SystemCommandRunner};

const ACTION_TARGET: &str = "brandit_runner::action";

/// Failures reported by a clipboard sink.
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    /// The sink's program is not available.
    #[error("clipboard sink '{sink}' is not available")]
    NotFound {
        /// Sink name.
        sink: String,
    },
    /// The sink ran and failed.
    #[error("clipboard sink '{sink}' failed: {source}")]
    Failed {
        /// Sink name.
        sink: String,
        /// Underlying program failure.
        #[source]
        source: CommandError,
    },
}

/// Failures reported by a notifier.
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// The notification program could not be launched.
    #[error("failed to send notification: {source}")]
    Launch {
        /// Underlying program failure.
        #[source]
        source: CommandError,
    },
}

/// Places text on the system clipboard.
pub trait ClipboardSink: Send + Sync {
    /// Short name used in log entries.
    fn name(&self) -> &str;

    /// Copies `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError::NotFound`] when the sink is unavailable and
    /// [`ClipboardError::Failed`] when it ran without success.
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Tells the user a copy happened.
pub trait Notifier: Send + Sync {
    /// Announces that `text` was copied.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the notification could not be sent.
    fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Why the fallback sink was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The primary sink ran and failed.
    RunError,
    /// The primary sink is not installed.
    NotFound,
}

/// How a copy ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The primary sink copied the text.
    Primary,
    /// The fallback sink copied the text.
    Fallback(FallbackReason),
    /// Both sinks failed; the text was not copied.
    Failed(FallbackReason),
}

impl CopyOutcome {
    /// Whether the text reached the clipboard.
    #[must_use]
    pub const fn copied(self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

enum CopyState {
    TryPrimary,
    TryFallback(FallbackReason),
    Done(CopyOutcome),
}

/// Primary/fallback copy strategy with an optional notification.
pub struct ActionExecutor {
    primary: Box<dyn ClipboardSink>,
    fallback: Box<dyn ClipboardSink>,
    notifier: Option<Box<dyn Notifier>>,
}

impl fmt::Debug for ActionExecutor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ActionExecutor")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("notifies", &self.notifier.is_some())
            .finish()
    }
}

impl ActionExecutor {
    /// Creates an executor without notifications.
    #[must_use]
    pub fn new(primary: impl ClipboardSink + 'static, fallback: impl ClipboardSink + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
            notifier: None,
        }
    }

    /// Notifies through `notifier` after every primary copy.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// `wl-copy` with a klipper fallback, notifying through `notify-send`
    /// when `notify` is set.
    #[must_use]
    pub fn system(notify: bool) -> Self {
        let runner = Arc::new(SystemCommandRunner);
        let executor = Self::new(
            CommandClipboard::wl_copy(runner.clone()),
            CommandClipboard::klipper(runner.clone()),
        );
        if notify {
            executor.with_notifier(CommandNotifier::notify_send(runner))
        } else {
            executor
        }
    }

    /// Copies `payload`, never failing.
    pub fn run(&self, payload: &str) -> CopyOutcome {
        let mut state = CopyState::TryPrimary;
        loop {
            state = match state {
                CopyState::TryPrimary => self.try_primary(payload),
                CopyState::TryFallback(reason) => self.try_fallback(payload, reason),
                CopyState::Done(outcome) => return outcome,
            };
        }
    }

    fn try_primary(&self, payload: &str) -> CopyState {
        match self.primary.copy(payload) {
            Ok(()) => {
                info!(
                    target: ACTION_TARGET,
                    sink = self.primary.name(),
                    "copied to clipboard"
                );
                self.notify(payload);
                CopyState::Done(CopyOutcome::Primary)
            }
            Err(ClipboardError::NotFound { sink }) => {
                info!(target: ACTION_TARGET, %sink, "primary clipboard not found, trying fallback");
                CopyState::TryFallback(FallbackReason::NotFound)
            }
            Err(error) => {
                warn!(target: ACTION_TARGET, %error, "primary clipboard failed, trying fallback");
                CopyState::TryFallback(FallbackReason::RunError)
            }
        }
    }

    fn try_fallback(&self, payload: &str, reason: FallbackReason) -> CopyState {
        match self.fallback.copy(payload) {
            Ok(()) => {
                info!(
                    target: ACTION_TARGET,
                    sink = self.fallback.name(),
                    ?reason,
                    "copied to clipboard through fallback"
                );
                CopyState::Done(CopyOutcome::Fallback(reason))
            }
            Err(error) => {
                warn!(target: ACTION_TARGET, %error, ?reason, "fallback clipboard failed");
                CopyState::Done(CopyOutcome::Failed(reason))
            }
        }
    }

    fn notify(&self, payload: &str) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        if let Err(error) = notifier.notify(payload) {
            warn!(target: ACTION_TARGET, %error, "notification failed");
        }
    }
}
