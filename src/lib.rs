//! Request broker library.
//!
//! A single HTTP entry point that accepts `{action, <sub-payload>}` envelopes,
//! forwards the sub-payload to the matching downstream service, and answers
//! with a uniform `{error, message, data}` envelope.

pub mod config;
pub mod downstream;
pub mod envelope;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::BrokerConfig;
pub use error::BrokerError;
pub use http::BrokerServer;
pub use lifecycle::Shutdown;
