//! Tests for the socket listener.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use brandit_config::SocketEndpoint;
use brandit_runner::ActionDescriptor;

use super::listener::CLIENT_IO_TIMEOUT;
use super::{ConnectionHandler, ConnectionStream, ListenerError, SocketListener};
use crate::dispatch::DispatchConnectionHandler;
use crate::tests::support::MockRunner;

/// Counts connections and tracks how many were being served at once.
#[derive(Default)]
struct ConnectionTally {
    served: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ConnectionHandler for ConnectionTally {
    fn handle(&self, mut stream: ConnectionStream) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
        thread::sleep(Duration::from_millis(20));
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.served.fetch_add(1, Ordering::SeqCst);
    }
}

#[fixture]
fn tcp_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp("127.0.0.1", 0)
}

fn wait_for_count(count: &AtomicUsize, expected: usize) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if count.load(Ordering::SeqCst) >= expected {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

#[rstest]
fn tcp_listener_serves_connections_one_at_a_time(tcp_endpoint: SocketEndpoint) {
    let listener = SocketListener::bind(&tcp_endpoint).expect("bind tcp listener");
    let addr = listener
        .local_addr()
        .expect("listener should report local address");
    let tally = Arc::new(ConnectionTally::default());
    let handler: Arc<dyn ConnectionHandler> = tally.clone();
    let handle = listener.start(handler).expect("start listener");

    let clients: Vec<_> = (0..3)
        .map(|_| TcpStream::connect(addr).expect("connect client"))
        .collect();
    drop(clients);

    assert!(wait_for_count(&tally.served, 3), "expected three connections");
    assert_eq!(tally.peak.load(Ordering::SeqCst), 1, "connections overlapped");
    handle.shutdown();
    handle.join().expect("join listener");
}

#[rstest]
fn idle_client_does_not_starve_later_calls(tcp_endpoint: SocketEndpoint) {
    let listener = SocketListener::bind(&tcp_endpoint).expect("bind tcp listener");
    let addr = listener
        .local_addr()
        .expect("listener should report local address");
    let mut runner = MockRunner::new();
    runner
        .expect_actions()
        .times(1)
        .returning(|| vec![ActionDescriptor::copy()]);
    let handler: Arc<dyn ConnectionHandler> =
        Arc::new(DispatchConnectionHandler::new(Arc::new(runner)));
    let handle = listener.start(handler).expect("start listener");

    let idle = TcpStream::connect(addr).expect("connect idle client");
    thread::sleep(Duration::from_millis(50));

    let mut caller = TcpStream::connect(addr).expect("connect caller");
    caller
        .set_read_timeout(Some(CLIENT_IO_TIMEOUT * 3))
        .expect("set caller timeout");
    caller
        .write_all(b"{\"interface\":\"org.kde.krunner1\",\"member\":\"Actions\"}\n")
        .expect("send call");
    let mut reply = String::new();
    BufReader::new(&caller)
        .read_line(&mut reply)
        .expect("caller should get a reply");

    assert!(reply.starts_with(r#"{"kind":"actions""#), "{reply}");
    drop(idle);
    handle.shutdown();
    handle.join().expect("join listener");
}

#[test]
fn tcp_bind_reports_port_in_use() {
    let reserved = std::net::TcpListener::bind(("127.0.0.1", 0)).expect("reserve port");
    let port = reserved.local_addr().expect("local addr").port();
    let error = SocketListener::bind(&SocketEndpoint::tcp("127.0.0.1", port))
        .expect_err("port is taken");
    assert!(matches!(error, ListenerError::BindTcp { .. }), "{error:?}");
}

#[cfg(unix)]
mod unix {
    use std::os::unix::net::{UnixListener, UnixStream};

    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn socket_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn endpoint_in(dir: &TempDir) -> SocketEndpoint {
        let path = dir.path().join("branditd.sock");
        SocketEndpoint::unix(path.to_str().expect("utf8 path"))
    }

    #[rstest]
    fn unix_listener_replaces_stale_socket_and_cleans_up(socket_dir: TempDir) {
        let path = socket_dir.path().join("branditd.sock");
        {
            let _stale = UnixListener::bind(&path).expect("bind stale listener");
        }
        assert!(path.exists(), "stale socket should remain");

        let listener = SocketListener::bind(&endpoint_in(&socket_dir)).expect("bind new listener");
        let tally = Arc::new(ConnectionTally::default());
        let handler: Arc<dyn ConnectionHandler> = tally.clone();
        let handle = listener.start(handler).expect("start listener");

        drop(UnixStream::connect(&path).expect("connect unix client"));
        assert!(wait_for_count(&tally.served, 1), "expected one connection");

        handle.shutdown();
        handle.join().expect("join listener");
        assert!(!path.exists(), "listener should remove unix socket on shutdown");
    }

    #[rstest]
    fn unix_listener_rejects_in_use_socket(socket_dir: TempDir) {
        let path = socket_dir.path().join("branditd.sock");
        let _existing = UnixListener::bind(&path).expect("bind existing listener");

        let error = SocketListener::bind(&endpoint_in(&socket_dir)).expect_err("should fail bind");
        assert!(matches!(error, ListenerError::UnixInUse { .. }));
    }

    #[rstest]
    fn unix_listener_rejects_regular_file(socket_dir: TempDir) {
        let path = socket_dir.path().join("branditd.sock");
        std::fs::write(&path, b"not a socket").expect("write file");

        let error = SocketListener::bind(&endpoint_in(&socket_dir)).expect_err("should fail bind");
        assert!(matches!(error, ListenerError::UnixNotSocket { .. }));
    }
}
