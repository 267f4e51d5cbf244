//! Connection handler that dispatches JSONL calls.

use std::io::{self, Read};
use std::sync::Arc;

use brandit_runner::RunnerService;
use tracing::{debug, warn};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::errors::DispatchError;
use super::request::BusRequest;
use super::response::ResponseWriter;
use super::router::{DISPATCH_TARGET, ServiceRouter};

/// Maximum size of a single request line in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Reads one call per connection and writes its reply stream.
#[derive(Debug, Clone)]
pub struct DispatchConnectionHandler {
    router: ServiceRouter,
}

impl DispatchConnectionHandler {
    /// Creates a handler dispatching onto `service`.
    pub fn new(service: Arc<dyn RunnerService + Send + Sync>) -> Self {
        Self {
            router: ServiceRouter::new(service),
        }
    }

    fn dispatch(&self, mut stream: ConnectionStream) {
        let request_bytes = match read_request_line(&mut stream) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(target: DISPATCH_TARGET, "client disconnected without request");
                return;
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to read request");
                let _ = ResponseWriter::new(&mut stream).write_error(&error);
                return;
            }
        };

        let mut writer = ResponseWriter::new(&mut stream);

        let request = match BusRequest::parse(&request_bytes) {
            Ok(request) => request,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "malformed request");
                let _ = writer.write_error(&error);
                return;
            }
        };

        if let Err(error) = request.validate() {
            warn!(target: DISPATCH_TARGET, %error, "invalid request");
            let _ = writer.write_error(&error);
            return;
        }

        debug!(
            target: DISPATCH_TARGET,
            interface = request.interface(),
            path = request.path(),
            member = request.member(),
            "dispatching call"
        );

        match self.router.route(&request, &mut writer) {
            Ok(result) => {
                if let Err(error) = writer.write_exit(result.status) {
                    warn!(target: DISPATCH_TARGET, %error, "failed to write exit");
                }
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "dispatch failed");
                let _ = writer.write_error(&error);
            }
        }
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.dispatch(stream);
    }
}

/// Reads a bounded JSONL request line from the stream.
///
/// Returns `Ok(None)` if the client disconnects without sending data, and the
/// partial line if it disconnects before the newline. A read that hits the
/// stream's timeout fails with [`DispatchError::RequestTimeout`].
fn read_request_line(stream: &mut impl Read) -> Result<Option<Vec<u8>>, DispatchError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;

        if bytes_read == 0 {
            return Ok(if buffer.is_empty() { None } else { Some(buffer) });
        }

        if let Some(newline_pos) = chunk[..bytes_read].iter().position(|b| *b == b'\n') {
            buffer.extend_from_slice(&chunk[..=newline_pos]);
            enforce_limit(buffer.len())?;
            return Ok(Some(buffer));
        }

        buffer.extend_from_slice(&chunk[..bytes_read]);
        enforce_limit(buffer.len())?;
    }
}

fn read_with_retry(stream: &mut impl Read, buf: &mut [u8]) -> Result<usize, DispatchError> {
    loop {
        match stream.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Err(DispatchError::RequestTimeout);
            }
            Err(e) => return Err(DispatchError::Io(e)),
        }
    }
}

fn enforce_limit(size: usize) -> Result<(), DispatchError> {
    if size > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(size, MAX_REQUEST_BYTES));
    }
    Ok(())
}
