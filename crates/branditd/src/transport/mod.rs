//! Socket listener serving the runner contract.
//!
//! The listener binds the configured endpoint and runs one accept loop on a
//! background thread. Each accepted connection is handled to completion on
//! that thread before the next one is accepted, so runner operations never
//! interleave. Accepted streams carry a short read and write timeout so an
//! idle client cannot hold the accept thread.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod listener_tests;

pub use self::errors::ListenerError;
pub(crate) use self::handler::{ConnectionHandler, ConnectionStream};
pub(crate) use self::listener::{ListenerHandle, SocketListener};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
