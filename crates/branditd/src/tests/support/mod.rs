//! Test harness utilities shared by the daemon suites.

mod config_loader;
mod reporter;
mod runner;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use runner::MockRunner;
pub use world::{TestWorld, world};
