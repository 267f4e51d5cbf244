//! Request deserialisation for the dispatch loop.
//!
//! A request names the interface, object path, and member being called, plus
//! the member's string arguments in call order.

use brandit_runner::OBJECT_PATH;
use serde::Deserialize;

use super::errors::DispatchError;

/// Parsed call from a client.
#[derive(Debug, Deserialize)]
pub struct BusRequest {
    /// Interface the member belongs to.
    pub interface: String,
    /// Object the call is addressed to.
    #[serde(default = "default_path")]
    pub path: String,
    /// Member being called.
    pub member: String,
    /// Positional arguments.
    #[serde(default)]
    pub arguments: Vec<String>,
}

fn default_path() -> String {
    OBJECT_PATH.to_owned()
}

impl BusRequest {
    /// Parses a JSONL line into a call.
    ///
    /// Trailing whitespace (including the newline delimiter) is trimmed before
    /// parsing.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedJsonl` if the line is empty or cannot
    /// be parsed as a call.
    pub fn parse(line: &[u8]) -> Result<Self, DispatchError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(DispatchError::malformed("empty request line"));
        }

        serde_json::from_slice(trimmed).map_err(DispatchError::from_json_error)
    }

    /// Checks that the interface and member are named.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidStructure` if either field is blank.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.interface.trim().is_empty() {
            return Err(DispatchError::invalid_structure("interface field is empty"));
        }
        if self.member.trim().is_empty() {
            return Err(DispatchError::invalid_structure("member field is empty"));
        }
        Ok(())
    }

    /// Interface name without surrounding whitespace.
    pub fn interface(&self) -> &str {
        self.interface.trim()
    }

    /// Object path without surrounding whitespace.
    pub fn path(&self) -> &str {
        self.path.trim()
    }

    /// Member name without surrounding whitespace.
    pub fn member(&self) -> &str {
        self.member.trim()
    }
}

fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}
