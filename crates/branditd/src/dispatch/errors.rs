//! Error types for request dispatch failures.

use std::io;

use thiserror::Error;

/// Errors surfaced while reading, parsing, or routing a call.
///
/// None of these come from the runner itself; its operations cannot fail.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request line could not be parsed as valid JSON.
    #[error("malformed JSONL: {message}")]
    MalformedJsonl {
        /// Parser diagnostic.
        message: String,
        /// Underlying parser error, when there is one.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request JSON does not describe a call.
    #[error("invalid request structure: {message}")]
    InvalidStructure {
        /// What was wrong with the request.
        message: String,
    },

    /// The call targets an interface other than the runner interface.
    #[error("unknown interface: {interface}")]
    UnknownInterface {
        /// Requested interface.
        interface: String,
    },

    /// The call targets an object path other than the runner object.
    #[error("unknown object path: {path}")]
    UnknownObject {
        /// Requested object path.
        path: String,
    },

    /// The member is not one of the runner operations.
    #[error("unknown member '{member}' on interface '{interface}'")]
    UnknownMember {
        /// Interface the member was looked up on.
        interface: String,
        /// Requested member.
        member: String,
    },

    /// The member was called with the wrong number of arguments.
    #[error("member '{member}' takes {expected} argument(s), got {actual}")]
    InvalidArguments {
        /// Member that was called.
        member: &'static str,
        /// Expected argument count.
        expected: usize,
        /// Received argument count.
        actual: usize,
    },

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Bytes read so far.
        size: usize,
        /// Configured limit.
        max_size: usize,
    },

    /// The client did not finish its request line in time.
    #[error("timed out waiting for the request line")]
    RequestTimeout,

    /// IO error during read or write.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Response serialisation failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Exit status reported to the client.
    ///
    /// Malformed or misaddressed calls return 1. Transport failures return 2.
    #[must_use]
    pub const fn exit_status(&self) -> i32 {
        match self {
            Self::MalformedJsonl { .. }
            | Self::InvalidStructure { .. }
            | Self::UnknownInterface { .. }
            | Self::UnknownObject { .. }
            | Self::UnknownMember { .. }
            | Self::InvalidArguments { .. }
            | Self::RequestTooLarge { .. }
            | Self::RequestTimeout => 1,
            Self::Io(_) | Self::SerializeResponse(_) => 2,
        }
    }

    pub(crate) fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJsonl {
            message: source.to_string(),
            source: Some(source),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJsonl {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_member(interface: impl Into<String>, member: impl Into<String>) -> Self {
        Self::UnknownMember {
            interface: interface.into(),
            member: member.into(),
        }
    }

    pub(crate) const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}
