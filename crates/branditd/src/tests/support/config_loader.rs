//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use brandit_config::{Config, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader that places the socket, template document, and diagnostic log
/// under a temporary directory.
#[derive(Clone)]
pub struct TestConfigLoader {
    dir: Arc<TempDir>,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory for daemon");
        Self { dir: Arc::new(dir) }
    }

    fn utf8(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name))
            .expect("temporary path was not valid UTF-8")
    }

    pub fn socket_path(&self) -> PathBuf {
        self.utf8("run/branditd.sock").into_std_path_buf()
    }

    pub fn templates_path(&self) -> PathBuf {
        self.utf8("config.yaml").into_std_path_buf()
    }

    pub fn write_templates(&self, contents: &str) {
        fs::write(self.templates_path(), contents).expect("write template document");
    }
}

impl Default for TestConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            daemon_socket: SocketEndpoint::unix(self.utf8("run/branditd.sock")),
            diagnostic_log: self.utf8("brandit.log"),
            templates_path: self.utf8("config.yaml"),
            notify: false,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("branditd"),
            OsString::from("--daemon-socket"),
            OsString::from("invalid://socket"),
        ];
        Config::load_from_iter(args)
    }
}
