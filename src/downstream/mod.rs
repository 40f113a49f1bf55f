//! Downstream client subsystem.
//!
//! # Data Flow
//! ```text
//! (ActionTarget, sub-payload)
//!     → client.rs (serialize, build POST)
//!     → transport.rs (shared reqwest client, bounded by timeout)
//!     → client.rs (drain body, classify status, decode envelope)
//!     → ResponseEnvelope or DownstreamError
//! ```
//!
//! # Design Decisions
//! - Exactly one call per inbound request: no retries, no fallback
//! - The reply body is consumed before classification, so the
//!   connection is released on every exit path
//! - One HTTP client for the whole process, built once at startup

pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::DownstreamClient;
pub use error::DownstreamError;
pub use transport::{HttpTransport, OutboundRequest, ReplyBody, Transport, TransportError};
