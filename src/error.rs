//! Broker-wide failure taxonomy.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::downstream::DownstreamError;
use crate::envelope::{DecodeError, ResponseEnvelope};
use crate::routing::RoutingError;

/// Every way handling a dispatch request can fail.
///
/// The display text becomes the `message` of the error envelope.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Inbound body was malformed or too large.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Action not in the dispatch table.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The downstream call failed.
    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    /// The inbound request deadline passed before a reply was ready.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl BrokerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::Decode(_) | BrokerError::Routing(_) => StatusCode::BAD_REQUEST,
            BrokerError::Downstream(e) => e.status_code(),
            BrokerError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::failure(self.to_string())
    }
}
