//! Member routing for launcher calls.
//!
//! Calls must address the runner interface and object. The member name is
//! matched exactly, as bus member names are case-sensitive, and its argument
//! count is checked before the runner is invoked.

use std::io::Write;
use std::sync::Arc;

use brandit_runner::{INTERFACE_NAME, OBJECT_PATH, RunnerService};
use tracing::debug;

use super::errors::DispatchError;
use super::request::BusRequest;
use super::response::{DaemonMessage, ResponseWriter};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Members of the runner interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// Query for matches.
    Match,
    /// List the actions offered on matches.
    Actions,
    /// Execute a picked match.
    Run,
    /// Release per-session resources.
    Teardown,
    /// Re-read the template document.
    ReloadConfig,
}

impl Member {
    /// Parses a member name.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownMember` if the name is not a runner
    /// member.
    pub fn parse(value: &str) -> Result<Self, DispatchError> {
        match value {
            "Match" => Ok(Self::Match),
            "Actions" => Ok(Self::Actions),
            "Run" => Ok(Self::Run),
            "Teardown" => Ok(Self::Teardown),
            "ReloadConfig" => Ok(Self::ReloadConfig),
            _ => Err(DispatchError::unknown_member(INTERFACE_NAME, value)),
        }
    }

    /// Canonical member name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Match => "Match",
            Self::Actions => "Actions",
            Self::Run => "Run",
            Self::Teardown => "Teardown",
            Self::ReloadConfig => "ReloadConfig",
        }
    }

    /// Number of string arguments the member takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Match => 1,
            Self::Run => 2,
            Self::Actions | Self::Teardown | Self::ReloadConfig => 0,
        }
    }
}

/// Result of routing and dispatching a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Exit status to return to the client.
    pub status: i32,
}

impl DispatchResult {
    /// A completed call.
    pub const fn success() -> Self {
        Self { status: 0 }
    }
}

/// Routes validated calls onto a [`RunnerService`].
#[derive(Clone)]
pub struct ServiceRouter {
    service: Arc<dyn RunnerService + Send + Sync>,
}

impl std::fmt::Debug for ServiceRouter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("ServiceRouter").finish_non_exhaustive()
    }
}

impl ServiceRouter {
    /// Creates a router dispatching onto `service`.
    pub fn new(service: Arc<dyn RunnerService + Send + Sync>) -> Self {
        Self { service }
    }

    /// Routes a call and writes its reply.
    ///
    /// The exit message is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the call is misaddressed, names an unknown member,
    /// has the wrong number of arguments, or the reply cannot be written.
    pub fn route<W: Write>(
        &self,
        request: &BusRequest,
        writer: &mut ResponseWriter<W>,
    ) -> Result<DispatchResult, DispatchError> {
        if request.interface() != INTERFACE_NAME {
            return Err(DispatchError::UnknownInterface {
                interface: request.interface().to_owned(),
            });
        }
        if request.path() != OBJECT_PATH {
            return Err(DispatchError::UnknownObject {
                path: request.path().to_owned(),
            });
        }
        let member = Member::parse(request.member())?;
        let arguments = request.arguments.as_slice();
        if arguments.len() != member.arity() {
            return Err(DispatchError::InvalidArguments {
                member: member.as_str(),
                expected: member.arity(),
                actual: arguments.len(),
            });
        }

        debug!(
            target: DISPATCH_TARGET,
            member = member.as_str(),
            "routing call"
        );

        match (member, arguments) {
            (Member::Match, [query]) => {
                let matches = self.service.match_query(query);
                writer.write_message(&DaemonMessage::Matches { matches })?;
            }
            (Member::Actions, []) => {
                let actions = self.service.actions();
                writer.write_message(&DaemonMessage::Actions { actions })?;
            }
            (Member::Run, [data, action_id]) => self.service.run(data, action_id),
            (Member::Teardown, []) => self.service.teardown(),
            (Member::ReloadConfig, []) => self.service.reload_config(),
            (member, arguments) => {
                return Err(DispatchError::InvalidArguments {
                    member: member.as_str(),
                    expected: member.arity(),
                    actual: arguments.len(),
                });
            }
        }
        Ok(DispatchResult::success())
    }
}
