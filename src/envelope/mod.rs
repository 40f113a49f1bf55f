//! Envelope codec.
//!
//! # Data Flow
//! ```text
//! Inbound body bytes
//!     → request.rs (size check, JSON decode, single-value check)
//!     → RequestEnvelope { action, auth?, logger? }
//!
//! Router / downstream outcome
//!     → response.rs (ResponseEnvelope { error, message, data? })
//!     → JSON bytes written to caller
//! ```
//!
//! # Design Decisions
//! - Decoding is permissive: unknown fields are ignored
//! - Envelopes are built per request and never shared
//! - A failure envelope never carries `data`

pub mod request;
pub mod response;

pub use request::{decode_request, AuthPayload, DecodeError, LoggerPayload, RequestEnvelope};
pub use response::{encode_response, ResponseEnvelope};
