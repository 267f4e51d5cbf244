use camino::Utf8PathBuf;
use std::env;
use std::path::PathBuf;

#[cfg(unix)]
use libc::geteuid;

#[cfg(unix)]
use dirs::runtime_dir;

use crate::logging::LogFormat;
use crate::socket::SocketEndpoint;

/// Default TCP port used when Unix domain sockets are not available.
pub const DEFAULT_TCP_PORT: u16 = 9780;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Character that marks a launcher query as a brand lookup.
pub const DEFAULT_TRIGGER: char = '!';

const DIAGNOSTIC_LOG_NAME: &str = "brandit_debug.log";

/// Default log filter expression used by the daemon.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Location of the append-only diagnostic log.
#[must_use]
pub fn default_diagnostic_log() -> Utf8PathBuf {
    utf8_or_tmp(env::temp_dir()).join(DIAGNOSTIC_LOG_NAME)
}

/// Per-user location of the YAML template document.
///
/// Resolves to `~/.config/brandIt/config.yaml`. When no home directory is
/// known the path is relative, which simply reads as a missing document.
#[must_use]
pub fn default_templates_path() -> Utf8PathBuf {
    let home = dirs::home_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .unwrap_or_default();
    home.join(".config").join("brandIt").join("config.yaml")
}

/// Computes the default socket endpoint for the daemon.
#[must_use]
pub fn default_socket_endpoint() -> SocketEndpoint {
    default_socket_endpoint_inner()
}

#[cfg(unix)]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    let (mut base, apply_namespace) = match runtime_base_directory() {
        Some(dir) => (dir, false),
        None => (utf8_or_tmp(env::temp_dir()), true),
    };

    base.push("brandit");
    if apply_namespace {
        base.push(user_namespace());
    }

    SocketEndpoint::unix(base.join("branditd.sock"))
}

#[cfg(unix)]
fn runtime_base_directory() -> Option<Utf8PathBuf> {
    runtime_dir().and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
}

fn utf8_or_tmp(candidate: PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(candidate).unwrap_or_else(|_| Utf8PathBuf::from("/tmp"))
}

#[cfg(unix)]
fn user_namespace() -> String {
    let uid = unsafe { geteuid() };
    format!("uid-{uid}")
}

#[cfg(not(unix))]
fn default_socket_endpoint_inner() -> SocketEndpoint {
    SocketEndpoint::tcp("127.0.0.1", DEFAULT_TCP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_live_under_brandit_config_directory() {
        let path = default_templates_path();
        assert!(path.ends_with(".config/brandIt/config.yaml"), "{path}");
    }

    #[test]
    fn diagnostic_log_uses_fixed_file_name() {
        assert_eq!(
            default_diagnostic_log().file_name(),
            Some("brandit_debug.log")
        );
    }

    #[cfg(unix)]
    #[test]
    fn default_socket_is_namespaced_under_brandit() {
        let endpoint = default_socket_endpoint();
        let path = endpoint.unix_path().expect("unix endpoint on unix hosts");
        assert_eq!(path.file_name(), Some("branditd.sock"));
        assert!(path.as_str().contains("brandit"));
    }
}
