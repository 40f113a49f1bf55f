//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, handlers)
//!     → request.rs (request ID, bounded body read, envelope decode)
//!     → routing::ActionRouter (one downstream call)
//!     → response.rs (envelope + status code)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{read_envelope, BrokerRequestId, X_REQUEST_ID};
pub use response::EnvelopeResponse;
pub use server::{AppState, BrokerServer, ServerError};
