//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Read the body under the configured size limit
//! - Decode the request envelope
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Oversized bodies are a decode error, not a transport error

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use http_body_util::LengthLimitError;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::envelope::{decode_request, DecodeError, RequestEnvelope};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Stamps each inbound request with a UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokerRequestId;

impl MakeRequestId for BrokerRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Read at most `limit` bytes from `body` and decode them.
pub async fn read_envelope(body: Body, limit: usize) -> Result<RequestEnvelope, DecodeError> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        let inner = e.into_inner();
        if inner.downcast_ref::<LengthLimitError>().is_some() {
            DecodeError::TooLarge { limit }
        } else {
            DecodeError::Read(inner.to_string())
        }
    })?;

    decode_request(&bytes, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_envelope() {
        let body = Body::from(r#"{"action":"logger","logger":{"name":"n","data":"d"}}"#);
        let envelope = read_envelope(body, 1024).await.unwrap();
        assert_eq!(envelope.action, "logger");
    }

    #[tokio::test]
    async fn test_read_envelope_over_limit() {
        let body = Body::from(vec![b' '; 64]);
        let err = read_envelope(body, 16).await.unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { limit: 16 }));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let request = Request::new(());
        let mut maker = BrokerRequestId;

        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();

        assert_ne!(a.header_value(), b.header_value());
        assert!(Uuid::parse_str(a.header_value().to_str().unwrap()).is_ok());
    }
}
