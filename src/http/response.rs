//! Response writing.
//!
//! # Responsibilities
//! - Serialize the envelope as the JSON body
//! - Pair it with the status chosen by the router or failure class
//!
//! # Design Decisions
//! - Every response body, including errors, is an envelope

use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::envelope::{encode_response, ResponseEnvelope};
use crate::error::BrokerError;

/// An envelope and the status it is written with.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeResponse {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

impl EnvelopeResponse {
    pub fn new(status: StatusCode, envelope: ResponseEnvelope) -> Self {
        Self { status, envelope }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, ResponseEnvelope::failure(message))
    }
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, "application/json")],
            encode_response(&self.envelope),
        )
            .into_response()
    }
}

impl From<&BrokerError> for EnvelopeResponse {
    fn from(err: &BrokerError) -> Self {
        Self::new(err.status_code(), err.to_envelope())
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        EnvelopeResponse::from(&self).into_response()
    }
}
