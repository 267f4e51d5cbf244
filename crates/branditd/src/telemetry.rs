//! Structured telemetry initialisation for the daemon.
//!
//! Events go to stderr and are teed into the append-only diagnostic log.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter, writer::MakeWriterExt};

use brandit_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: later invocations return a fresh
/// [`TelemetryHandle`] without touching the global state again.
///
/// # Examples
///
/// ```rust,no_run
/// use brandit_config::Config;
/// use branditd::telemetry;
///
/// # fn main() -> Result<(), branditd::telemetry::TelemetryError> {
/// let config = Config::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
/// drop(first);
/// drop(second);
/// # Ok(())
/// # }
/// ```
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn build_subscriber(config: &Config) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let writer = io::stderr.and(DiagnosticLog::new(config.diagnostic_log()));

    let builder = |filter: EnvFilter| {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(writer)
            // The same bytes land in the diagnostic file.
            .with_ansi(false)
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder(filter).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder(filter).compact().finish()),
    })
}

/// Append-only diagnostic file.
///
/// The file (and its parent directory) is created on the first write. Every
/// I/O failure is ignored: a broken diagnostic log never affects the daemon.
#[derive(Debug)]
pub struct DiagnosticLog {
    path: Utf8PathBuf,
    file: Mutex<Option<File>>,
}

impl DiagnosticLog {
    /// Creates a log appending to `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn append(&self, bytes: &[u8]) {
        let mut slot = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = open_append(&self.path).ok();
        }
        let failed = slot
            .as_mut()
            .is_some_and(|file| file.write_all(bytes).is_err());
        if failed {
            // Reopen on the next write in case the file was rotated away.
            *slot = None;
        }
    }
}

fn open_append(path: &Utf8Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Writer handed out per event by [`DiagnosticLog`].
#[derive(Debug)]
pub struct DiagnosticWriter<'a> {
    log: &'a DiagnosticLog,
}

impl Write for DiagnosticWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for DiagnosticLog {
    type Writer = DiagnosticWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        DiagnosticWriter { log: self }
    }
}
