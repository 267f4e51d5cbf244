//! Response serialisation for the dispatch loop.
//!
//! Every call ends with an `exit` message. `Match` and `Actions` send their
//! reply list first; the other members send nothing else on success.

use std::io::Write;

use brandit_runner::{ActionDescriptor, MatchResult};
use serde::Serialize;

use super::errors::DispatchError;

/// Target stream for output messages.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamTarget {
    /// Standard error stream.
    Stderr,
}

/// Response messages sent to clients, one per JSONL line.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaemonMessage {
    /// Diagnostic text for the client.
    Stream {
        /// Target stream on the client side.
        stream: StreamTarget,
        /// Text payload to write.
        data: String,
    },
    /// Reply to `Match`.
    Matches {
        /// Matches in launcher tuple form.
        matches: Vec<MatchResult>,
    },
    /// Reply to `Actions`.
    Actions {
        /// Actions in launcher tuple form.
        actions: Vec<ActionDescriptor>,
    },
    /// Terminal message signalling completion with an exit status.
    Exit {
        /// Exit status code (0 for success).
        status: i32,
    },
}

impl DaemonMessage {
    /// Creates a stderr stream message.
    pub fn stderr(data: impl Into<String>) -> Self {
        Self::Stream {
            stream: StreamTarget::Stderr,
            data: data.into(),
        }
    }

    /// Creates an exit message with the given status code.
    pub const fn exit(status: i32) -> Self {
        Self::Exit { status }
    }
}

/// Writes JSONL-framed daemon messages to a stream.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wraps the given output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a daemon message as a JSONL line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write_message(&mut self, message: &DaemonMessage) -> Result<(), DispatchError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Writes a stream message to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_stderr(&mut self, data: impl Into<String>) -> Result<(), DispatchError> {
        self.write_message(&DaemonMessage::stderr(data))
    }

    /// Writes an exit message and flushes the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn write_exit(&mut self, status: i32) -> Result<(), DispatchError> {
        self.write_message(&DaemonMessage::exit(status))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes the error to stderr followed by an exit carrying its status.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_error(&mut self, error: &DispatchError) -> Result<(), DispatchError> {
        self.write_stderr(format!("error: {error}\n"))?;
        self.write_exit(error.exit_status())
    }
}
