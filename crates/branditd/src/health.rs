//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use brandit_config::{Config, TemplateConfig};
use brandit_runner::{INTERFACE_NAME, SERVICE_NAME};

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = "branditd::health";

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the initial template document is in place.
    fn templates_loaded(&self, templates: &TemplateConfig);

    /// Invoked once the socket listener accepts connections.
    fn listener_ready(&self, config: &Config);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn templates_loaded(&self, templates: &TemplateConfig) {
        (**self).templates_loaded(templates);
    }

    fn listener_ready(&self, config: &Config) {
        (**self).listener_ready(config);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            socket = %config.daemon_socket(),
            templates = %config.templates_path(),
            diagnostic_log = %config.diagnostic_log(),
            trigger = %config.trigger(),
            log_format = ?config.log_format(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn templates_loaded(&self, templates: &TemplateConfig) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "templates_loaded",
            patterns = templates.patterns().len(),
            "template document ready"
        );
    }

    fn listener_ready(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_ready",
            service = SERVICE_NAME,
            interface = INTERFACE_NAME,
            socket = %config.daemon_socket(),
            "listening for launcher calls"
        );
    }
}
