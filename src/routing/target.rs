//! Downstream targets for each action.
//!
//! # Responsibilities
//! - Describe where and how each action is delivered
//! - Build the immutable action → target table from configuration
//!
//! # Design Decisions
//! - `TargetTable::get` is a total match over `Action`; a new action
//!   does not compile until it has a target
//! - Success is a single expected status (202 Accepted)

use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::{ServiceConfig, ServicesConfig};
use crate::routing::action::Action;

/// How one action reaches its downstream service.
#[derive(Debug, Clone)]
pub struct ActionTarget {
    pub action: Action,
    pub url: Url,
    pub method: Method,
    /// The only status treated as success.
    pub expected_status: StatusCode,
    /// Status surfaced when the service replies with `error: true`.
    pub logic_error_status: StatusCode,
}

impl ActionTarget {
    pub fn new(action: Action, url: Url) -> Self {
        Self {
            action,
            url,
            method: Method::POST,
            expected_status: StatusCode::ACCEPTED,
            logic_error_status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn with_logic_error_status(mut self, status: StatusCode) -> Self {
        self.logic_error_status = status;
        self
    }

    pub fn success_message(&self) -> &'static str {
        self.action.success_message()
    }

    fn from_config(action: Action, config: &ServiceConfig) -> Result<Self, TargetError> {
        let url = Url::parse(&config.url).map_err(|source| TargetError::InvalidUrl {
            action,
            url: config.url.clone(),
            source,
        })?;
        let status = StatusCode::from_u16(config.logic_error_status)
            .map_err(|_| TargetError::InvalidStatus {
                action,
                status: config.logic_error_status,
            })?;

        Ok(Self::new(action, url).with_logic_error_status(status))
    }
}

/// Errors building the target table.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid URL for {action} service '{url}': {source}")]
    InvalidUrl {
        action: Action,
        url: String,
        source: url::ParseError,
    },

    #[error("invalid status {status} for {action} service")]
    InvalidStatus { action: Action, status: u16 },
}

/// Static mapping from every action to its target.
#[derive(Debug, Clone)]
pub struct TargetTable {
    auth: ActionTarget,
    logger: ActionTarget,
}

impl TargetTable {
    pub fn new(auth: ActionTarget, logger: ActionTarget) -> Self {
        Self { auth, logger }
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self, TargetError> {
        Ok(Self::new(
            ActionTarget::from_config(Action::Auth, &config.auth)?,
            ActionTarget::from_config(Action::Logger, &config.logger)?,
        ))
    }

    pub fn get(&self, action: Action) -> &ActionTarget {
        match action {
            Action::Auth => &self.auth,
            Action::Logger => &self.logger,
        }
    }
}
