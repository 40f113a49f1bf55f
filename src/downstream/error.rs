//! Downstream call failures.

use reqwest::StatusCode;
use thiserror::Error;

use crate::downstream::transport::TransportError;
use crate::routing::Action;

/// Why a downstream call did not produce a success envelope.
///
/// The display text is the message returned to the caller.
#[derive(Debug, Error)]
pub enum DownstreamError {
    /// The sub-payload could not be serialized.
    #[error("failed to encode {action} payload: {source}")]
    Encode {
        action: Action,
        source: serde_json::Error,
    },

    /// The service could not be reached or its body could not be read.
    #[error("{source}")]
    Transport {
        action: Action,
        source: TransportError,
    },

    /// The service answered 401.
    #[error("invalid credentials")]
    Unauthorized { action: Action },

    /// The service answered anything other than the expected status.
    #[error("error calling {action} service")]
    UnexpectedStatus { action: Action, status: StatusCode },

    /// The service answered with a body that is not an envelope.
    #[error("{source}")]
    MalformedReply {
        action: Action,
        source: serde_json::Error,
    },

    /// The service answered with an envelope carrying `error: true`.
    #[error("{message}")]
    Rejected {
        action: Action,
        message: String,
        status: StatusCode,
    },
}

impl DownstreamError {
    /// Status returned to the caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DownstreamError::Encode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DownstreamError::Transport { .. }
            | DownstreamError::Unauthorized { .. }
            | DownstreamError::UnexpectedStatus { .. }
            | DownstreamError::MalformedReply { .. } => StatusCode::BAD_REQUEST,
            DownstreamError::Rejected { status, .. } => *status,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DownstreamError::Encode { .. } => "encode",
            DownstreamError::Transport { source, .. } if source.is_timeout() => "timeout",
            DownstreamError::Transport { .. } => "transport",
            DownstreamError::Unauthorized { .. } => "unauthorized",
            DownstreamError::UnexpectedStatus { .. } => "unexpected_status",
            DownstreamError::MalformedReply { .. } => "malformed_reply",
            DownstreamError::Rejected { .. } => "rejected",
        }
    }
}
