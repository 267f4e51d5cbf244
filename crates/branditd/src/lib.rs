//! The BrandIt runner daemon.
//!
//! `branditd` serves the launcher runner contract (`Match`, `Actions`, `Run`,
//! `Teardown`, `ReloadConfig`) over a local socket. Startup loads the daemon
//! settings through [`brandit_config`], installs structured telemetry that
//! also feeds the append-only diagnostic log, prepares the socket directory,
//! and loads the template document. Calls are then served one at a time until
//! a termination signal arrives.
//!
//! Only startup can fail. Once the listener is up, every runner operation
//! degrades to an empty reply or a log entry rather than an error.

mod bootstrap;
mod dispatch;
mod health;
mod process;
pub mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::DispatchError;
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use telemetry::{DiagnosticLog, TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
