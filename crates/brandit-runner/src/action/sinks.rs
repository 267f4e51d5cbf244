//! Program-backed clipboard sinks and notifier.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{ClipboardError, ClipboardSink, NotifyError, Notifier};
use crate::command::{CommandError, CommandRunner};

const SINK_TARGET: &str = "brandit_runner::action";

const NOTIFY_SUMMARY: &str = "Brand Text Copied";
const NOTIFY_ICON: &str = "edit-copy";
const NOTIFY_EXPIRE_MS: u32 = 2000;

/// A clipboard sink that hands the text to an external program as its last
/// argument.
#[derive(Clone)]
pub struct CommandClipboard {
    name: &'static str,
    program: String,
    leading_args: Vec<String>,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for CommandClipboard {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandClipboard")
            .field("name", &self.name)
            .field("program", &self.program)
            .field("leading_args", &self.leading_args)
            .finish_non_exhaustive()
    }
}

impl CommandClipboard {
    /// Builds a sink running `program leading_args... <text>`.
    #[must_use]
    pub fn new(
        name: &'static str,
        program: impl Into<String>,
        leading_args: impl IntoIterator<Item = impl Into<String>>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            name,
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
            runner,
        }
    }

    /// The Wayland clipboard: `wl-copy <text>`.
    #[must_use]
    pub fn wl_copy(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new("wl-copy", "wl-copy", Vec::<String>::new(), runner)
    }

    /// The KDE clipboard manager over the session bus:
    /// `qdbus org.kde.klipper /klipper setClipboardContents <text>`.
    #[must_use]
    pub fn klipper(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new(
            "klipper",
            "qdbus",
            ["org.kde.klipper", "/klipper", "setClipboardContents"],
            runner,
        )
    }

    fn arguments(&self, text: &str) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push(text.to_owned());
        args
    }
}

impl ClipboardSink for CommandClipboard {
    fn name(&self) -> &str {
        self.name
    }

    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.runner
            .run(&self.program, &self.arguments(text))
            .map_err(|source| match source {
                CommandError::NotFound { .. } => ClipboardError::NotFound {
                    sink: self.name.to_owned(),
                },
                other => ClipboardError::Failed {
                    sink: self.name.to_owned(),
                    source: other,
                },
            })
    }
}

/// Desktop notification through `notify-send`.
#[derive(Clone)]
pub struct CommandNotifier {
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for CommandNotifier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandNotifier")
            .finish_non_exhaustive()
    }
}

impl CommandNotifier {
    /// Builds a notifier launching `notify-send` through `runner`.
    #[must_use]
    pub const fn notify_send(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let args = vec![
            NOTIFY_SUMMARY.to_owned(),
            format!("Copied \"{text}\" to clipboard"),
            format!("--icon={NOTIFY_ICON}"),
            format!("--expire-time={NOTIFY_EXPIRE_MS}"),
        ];
        match self.runner.run("notify-send", &args) {
            Ok(()) => Ok(()),
            Err(CommandError::Failed { status, .. }) => {
                debug!(
                    target: SINK_TARGET,
                    %status,
                    "notify-send exited unsuccessfully"
                );
                Ok(())
            }
            Err(source) => Err(NotifyError::Launch { source }),
        }
    }
}
