//! Test doubles shared by the unit and behaviour tests.


use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use brandit_config::{DEFAULT_PATTERN, TemplateConfig};

use crate::action::{ClipboardError, ClipboardSink, NotifyError, Notifier};
use crate::command::{CommandError, CommandRunner};
use crate::store::{TemplateLoadError, TemplateSource};

/// Shared counter of how often a [`ScriptedSource`] was read.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadCounter(Arc<AtomicUsize>);

impl LoadCounter {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// An in-memory template source whose document can be swapped between loads.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedSource {
    document: Arc<Mutex<Option<TemplateConfig>>>,
    loads: LoadCounter,
}

impl ScriptedSource {
    pub(crate) fn new<'a>(patterns: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::with_default(DEFAULT_PATTERN, patterns)
    }

    pub(crate) fn with_default<'a>(
        default_pattern: &str,
        patterns: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(TemplateConfig::new(
                default_pattern,
                patterns,
            )))),
            loads: LoadCounter::default(),
        }
    }

    /// A source whose document is missing.
    pub(crate) fn missing() -> Self {
        Self {
            document: Arc::new(Mutex::new(None)),
            loads: LoadCounter::default(),
        }
    }

    pub(crate) fn replace<'a>(&self, patterns: impl IntoIterator<Item = (&'a str, &'a str)>) {
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(TemplateConfig::new(DEFAULT_PATTERN, patterns));
    }

    pub(crate) fn load_counter(&self) -> LoadCounter {
        self.loads.clone()
    }
}

impl TemplateSource for ScriptedSource {
    fn describe(&self) -> String {
        String::from("scripted")
    }

    fn load(&self) -> Result<TemplateConfig, TemplateLoadError> {
        self.loads.0.fetch_add(1, Ordering::SeqCst);
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| TemplateLoadError::Missing {
                path: "scripted".into(),
            })
    }
}

/// Scripted result of launching a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Launch {
    Succeeds,
    Missing,
    ExitsWith(i32),
}

/// Records every program launch and answers with a scripted outcome.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    outcomes: HashMap<String, Launch>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub(crate) fn with(mut self, program: &str, launch: Launch) -> Self {
        self.outcomes.insert(program.to_owned(), launch);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|(program, _)| program).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), CommandError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((program.to_owned(), args.to_vec()));
        match self.outcomes.get(program).copied().unwrap_or(Launch::Succeeds) {
            Launch::Succeeds => Ok(()),
            Launch::Missing => Err(CommandError::NotFound {
                program: program.to_owned(),
            }),
            Launch::ExitsWith(code) => Err(CommandError::Failed {
                program: program.to_owned(),
                status: code.to_string(),
                stderr: String::new(),
            }),
        }
    }
}

/// Clipboard sink recording what it was asked to copy.
#[derive(Debug, Clone)]
pub(crate) struct RecordingSink {
    name: &'static str,
    outcome: Launch,
    copies: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub(crate) fn new(name: &'static str, outcome: Launch) -> Self {
        Self {
            name,
            outcome,
            copies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn copies(&self) -> Vec<String> {
        self.copies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClipboardSink for RecordingSink {
    fn name(&self) -> &str {
        self.name
    }

    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.copies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
        match self.outcome {
            Launch::Succeeds => Ok(()),
            Launch::Missing => Err(ClipboardError::NotFound {
                sink: self.name.to_owned(),
            }),
            Launch::ExitsWith(code) => Err(ClipboardError::Failed {
                sink: self.name.to_owned(),
                source: CommandError::Failed {
                    program: self.name.to_owned(),
                    status: code.to_string(),
                    stderr: String::new(),
                },
            }),
        }
    }
}

/// Notifier recording every announcement, optionally failing each one.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNotifier {
    fails: bool,
    notes: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub(crate) fn failing() -> Self {
        Self {
            fails: true,
            notes: Arc::default(),
        }
    }

    pub(crate) fn notes(&self) -> Vec<String> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str) -> Result<(), NotifyError> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
        if self.fails {
            return Err(NotifyError::Launch {
                source: CommandError::NotFound {
                    program: String::from("notify-send"),
                },
            });
        }
        Ok(())
    }
}
