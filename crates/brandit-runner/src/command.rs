//! Launching the external clipboard and notification programs.
//!
//! Every side effect of a copy goes through [`CommandRunner`], so the
//! [`crate::ActionExecutor`] never spawns processes itself.

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

/// Tracing target for external program launches.
const COMMAND_TARGET: &str = "brandit_runner::command";

/// Failures while running an external program.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// The program is not installed or not on `PATH`.
    #[error("program '{program}' not found")]
    NotFound {
        /// Program that was looked up.
        program: String,
    },
    /// The program ran and exited unsuccessfully.
    #[error("program '{program}' exited with {status}: {stderr}")]
    Failed {
        /// Program that ran.
        program: String,
        /// Exit code, or `signal` when the process was killed.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },
    /// The program could not be launched or waited on.
    #[error("failed to run program '{program}': {source}")]
    Io {
        /// Program that was launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl CommandError {
    /// Whether the program is absent, as opposed to having failed.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Runs a program to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the program is missing, cannot be
    /// launched, or exits with a non-zero status.
    fn run(&self, program: &str, args: &[String]) -> Result<(), CommandError>;
}

/// Runs programs with [`std::process::Command`].
///
/// Standard input is closed and standard output is discarded; standard error
/// is captured for the failure report.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), CommandError> {
        debug!(
            target: COMMAND_TARGET,
            program,
            arg_count = args.len(),
            "running external program"
        );
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    CommandError::NotFound {
                        program: program.to_owned(),
                    }
                } else {
                    CommandError::Io {
                        program: program.to_owned(),
                        source: Arc::new(source),
                    }
                }
            })?;

        if output.status.success() {
            return Ok(());
        }
        Err(CommandError::Failed {
            program: program.to_owned(),
            status: output
                .status
                .code()
                .map_or_else(|| String::from("signal"), |code| code.to_string()),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}
