//! HTTP transport to downstream services.
//!
//! # Responsibilities
//! - Own the process-wide HTTP client (timeouts, pool size)
//! - Send one JSON request and hand back the unread reply
//!
//! # Design Decisions
//! - `Transport` is the seam between classification logic and the network
//! - Consuming a `ReplyBody` releases its connection

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::{DownstreamConfig, TimeoutConfig};

/// A fully built request for a downstream service.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    /// JSON-encoded sub-payload.
    pub body: Vec<u8>,
}

/// Network-level failure: refused connection, DNS, timeout, broken body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(e.to_string())
        } else {
            Self::new(e.to_string())
        }
    }
}

/// A downstream reply whose body has not been read yet.
pub trait ReplyBody: Send {
    fn status(&self) -> StatusCode;

    /// Read the whole body, releasing the underlying connection.
    fn into_bytes(self) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// Sends requests to downstream services.
pub trait Transport: Send + Sync {
    type Reply: ReplyBody;

    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<Self::Reply, TransportError>> + Send;
}

/// [`Transport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the shared client. Called once at startup.
    pub fn new(config: &DownstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.downstream_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;

        tracing::debug!(
            timeout_secs = timeouts.downstream_secs,
            connect_timeout_secs = timeouts.connect_secs,
            pool_max_idle_per_host = config.pool_max_idle_per_host,
            "Downstream client built"
        );

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    type Reply = reqwest::Response;

    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<Self::Reply, TransportError>> + Send {
        let pending = self
            .client
            .request(request.method, request.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(request.body)
            .send();

        async move { pending.await.map_err(TransportError::from) }
    }
}

impl ReplyBody for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }

    fn into_bytes(self) -> impl Future<Output = Result<Bytes, TransportError>> + Send {
        async move { self.bytes().await.map_err(TransportError::from) }
    }
}
