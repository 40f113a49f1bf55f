//! Downstream call protocol.
//!
//! # Responsibilities
//! - Serialize the sub-payload and POST it to the target
//! - Classify the reply by status code
//! - Decode the service's envelope and rewrap its data
//!
//! # Status Classes
//! ```text
//! transport failure          → Transport        (400)
//! 401 Unauthorized           → Unauthorized     (400, "invalid credentials")
//! anything but expected      → UnexpectedStatus (400, "error calling <service> service")
//! expected, undecodable body → MalformedReply   (400)
//! expected, error: true      → Rejected         (target's logic_error_status)
//! expected, error: false     → success envelope (target's success message)
//! ```

use std::time::Instant;

use reqwest::StatusCode;
use serde::Serialize;

use crate::downstream::error::DownstreamError;
use crate::downstream::transport::{HttpTransport, OutboundRequest, ReplyBody, Transport};
use crate::envelope::ResponseEnvelope;
use crate::observability::metrics;
use crate::routing::ActionTarget;

/// Calls downstream services over a [`Transport`].
#[derive(Debug, Clone)]
pub struct DownstreamClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> DownstreamClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver `payload` to `target` and translate the reply.
    pub async fn call<P>(
        &self,
        target: &ActionTarget,
        payload: &P,
    ) -> Result<ResponseEnvelope, DownstreamError>
    where
        P: Serialize + Sync,
    {
        let start = Instant::now();
        let result = self.exchange(target, payload).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_downstream(target.action.as_str(), outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                service = %target.action,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Downstream call succeeded"
            ),
            Err(e) => tracing::warn!(
                service = %target.action,
                url = %target.url,
                outcome,
                error = %e,
                "Downstream call failed"
            ),
        }

        result
    }

    async fn exchange<P>(
        &self,
        target: &ActionTarget,
        payload: &P,
    ) -> Result<ResponseEnvelope, DownstreamError>
    where
        P: Serialize + Sync,
    {
        let action = target.action;
        let body = serde_json::to_vec_pretty(payload)
            .map_err(|source| DownstreamError::Encode { action, source })?;

        let request = OutboundRequest {
            method: target.method.clone(),
            url: target.url.clone(),
            body,
        };

        tracing::debug!(service = %action, url = %target.url, "Calling downstream service");

        let reply = self
            .transport
            .send(request)
            .await
            .map_err(|source| DownstreamError::Transport { action, source })?;

        let status = reply.status();
        // Drain before classifying so every branch below releases the connection.
        let body = reply.into_bytes().await;

        if status == StatusCode::UNAUTHORIZED {
            return Err(DownstreamError::Unauthorized { action });
        }
        if status != target.expected_status {
            return Err(DownstreamError::UnexpectedStatus { action, status });
        }

        let body = body.map_err(|source| DownstreamError::Transport { action, source })?;
        let reply: ResponseEnvelope = serde_json::from_slice(&body)
            .map_err(|source| DownstreamError::MalformedReply { action, source })?;

        if reply.error {
            let message = if reply.message.is_empty() {
                format!("error calling {action} service")
            } else {
                reply.message
            };
            return Err(DownstreamError::Rejected {
                action,
                message,
                status: target.logic_error_status,
            });
        }

        Ok(ResponseEnvelope::success(target.success_message(), reply.data))
    }
}
