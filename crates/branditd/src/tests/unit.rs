//! Unit tests for the daemon bootstrap utilities.

use std::sync::Arc;

use brandit_config::{Config, SocketEndpoint};
use rstest::rstest;

use crate::bootstrap::ConfigLoader;
use crate::telemetry;
use crate::{BootstrapError, StaticConfigLoader, bootstrap_with};

use super::support::{HealthEvent, RecordingHealthReporter, TestConfigLoader};

#[rstest]
fn bootstrap_loads_templates_before_reporting_success() {
    let loader = TestConfigLoader::new();
    loader.write_templates("patterns:\n  github: \"gh/{brand}\"\n  gitlab: \"gl/{brand}\"\n");
    let reporter = Arc::new(RecordingHealthReporter::default());

    let daemon = bootstrap_with(&loader, reporter.as_ref()).expect("bootstrap should succeed");

    assert_eq!(
        reporter.events(),
        [
            HealthEvent::BootstrapStarting,
            HealthEvent::TemplatesLoaded(2),
            HealthEvent::BootstrapSucceeded,
        ]
    );
    let stored = daemon.store().snapshot().expect("document loaded eagerly");
    assert!(stored.is_custom("github"));
}

#[rstest]
fn bootstrap_prepares_the_socket_directory() {
    let loader = TestConfigLoader::new();
    let reporter = RecordingHealthReporter::default();

    bootstrap_with(&loader, &reporter).expect("bootstrap should succeed");

    let parent = loader.socket_path();
    let parent = parent.parent().expect("socket has a parent");
    assert!(parent.is_dir(), "{} should exist", parent.display());
}

#[cfg(unix)]
#[rstest]
fn bootstrap_fails_when_socket_directory_cannot_be_created() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "regular file").expect("write blocker");
    let socket = blocker.join("branditd.sock");
    let config = Config {
        daemon_socket: SocketEndpoint::unix(socket.to_str().expect("utf8 path")),
        diagnostic_log: dir.path().join("brandit.log").to_str().expect("utf8 path").into(),
        ..Config::default()
    };
    let reporter = RecordingHealthReporter::default();

    let error = bootstrap_with(&StaticConfigLoader::new(config), &reporter)
        .expect_err("socket directory is a file");

    assert!(matches!(error, BootstrapError::Socket { .. }), "{error:?}");
    assert!(matches!(
        reporter.events().last(),
        Some(HealthEvent::BootstrapFailed(_))
    ));
}

#[rstest]
fn telemetry_initialisation_is_idempotent() {
    let config = TestConfigLoader::new().load().expect("test configuration");
    telemetry::initialise(&config).expect("first initialisation");
    telemetry::initialise(&config).expect("second initialisation");
}
