//! Action tags and their sub-payloads.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::envelope::{AuthPayload, LoggerPayload, RequestEnvelope};

/// Every action the broker knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Auth,
    Logger,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Auth, Action::Logger];

    /// Wire name of the action, also used to name its service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Auth => "auth",
            Action::Logger => "logger",
        }
    }

    /// Message put on the envelope when the downstream call succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Auth => "Authenticated!",
            Action::Logger => "Logged",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| RoutingError::UnknownAction(s.to_string()))
    }
}

/// Errors raised while selecting an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("no such action available")]
    UnknownAction(String),
}

/// An action bound to the sub-payload it forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Auth(AuthPayload),
    Logger(LoggerPayload),
}

impl Dispatch {
    /// Select the sub-payload named by `action`, dropping the others.
    ///
    /// A known action with no sub-payload forwards an empty one.
    pub fn from_envelope(envelope: RequestEnvelope) -> Result<Self, RoutingError> {
        let dispatch = match envelope.action.parse::<Action>()? {
            Action::Auth => Dispatch::Auth(envelope.auth.unwrap_or_default()),
            Action::Logger => Dispatch::Logger(envelope.logger.unwrap_or_default()),
        };
        Ok(dispatch)
    }

    pub fn action(&self) -> Action {
        match self {
            Dispatch::Auth(_) => Action::Auth,
            Dispatch::Logger(_) => Action::Logger,
        }
    }
}
