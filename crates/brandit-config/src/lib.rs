//! Shared configuration for the BrandIt runner daemon.
//!
//! Two documents are described here. [`Config`] holds the daemon settings
//! (socket, logging, template location) and is layered by `ortho_config`
//! from CLI flags, `BRANDIT_*` environment variables, and an optional TOML
//! file. [`TemplateConfig`] is the user-facing YAML document mapping keywords
//! to text templates; it is read by the runner and never fails the process.

mod defaults;
mod logging;
mod socket;
mod templates;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TCP_PORT, DEFAULT_TRIGGER, default_diagnostic_log,
    default_log_filter, default_log_filter_string, default_log_format, default_socket_endpoint,
    default_templates_path,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};
pub use templates::{DEFAULT_PATTERN, PLACEHOLDER, TemplateConfig, TemplateParseError};

/// Daemon settings resolved from CLI, environment, and configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "BRANDIT")]
pub struct Config {
    /// Endpoint the runner contract is served on.
    #[ortho_config(default = default_socket_endpoint())]
    pub daemon_socket: SocketEndpoint,
    /// `tracing` filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for stderr logging.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Append-only diagnostic log file.
    #[ortho_config(default = default_diagnostic_log())]
    pub diagnostic_log: Utf8PathBuf,
    /// Location of the YAML template document.
    #[ortho_config(default = default_templates_path())]
    pub templates_path: Utf8PathBuf,
    /// Character that marks a launcher query as ours.
    #[ortho_config(default = DEFAULT_TRIGGER)]
    pub trigger: char,
    /// Whether a successful copy raises a desktop notification.
    #[ortho_config(default = true)]
    pub notify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: default_socket_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            diagnostic_log: default_diagnostic_log(),
            templates_path: default_templates_path(),
            trigger: DEFAULT_TRIGGER,
            notify: true,
        }
    }
}

impl Config {
    /// Endpoint the daemon listens on.
    #[must_use]
    pub fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Stderr log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Path of the diagnostic log sink.
    #[must_use]
    pub fn diagnostic_log(&self) -> &camino::Utf8Path {
        &self.diagnostic_log
    }

    /// Path of the template document.
    #[must_use]
    pub fn templates_path(&self) -> &camino::Utf8Path {
        &self.templates_path
    }

    /// Trigger character for launcher queries.
    #[must_use]
    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Whether copy notifications are enabled.
    #[must_use]
    pub fn notify(&self) -> bool {
        self.notify
    }
}
