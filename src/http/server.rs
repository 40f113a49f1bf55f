//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Build the action-target table and shared downstream client once
//! - Dispatch `POST /handle` to the action router under the request deadline
//! - Serve until the shutdown signal fires
//!
//! # Design Decisions
//! - The deadline is enforced in the handler so an expired request still
//!   gets an error envelope

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::BrokerConfig;
use crate::downstream::{DownstreamClient, HttpTransport, TransportError};
use crate::envelope::ResponseEnvelope;
use crate::error::BrokerError;
use crate::http::request::{read_envelope, BrokerRequestId, X_REQUEST_ID};
use crate::http::response::EnvelopeResponse;
use crate::observability::metrics;
use crate::routing::{Action, ActionRouter, TargetError, TargetTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ActionRouter>,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

/// Errors building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid service target: {0}")]
    Targets(#[from] TargetError),

    #[error("failed to build downstream client: {0}")]
    Client(#[from] TransportError),
}

/// HTTP server for the broker.
pub struct BrokerServer {
    router: Router,
}

impl BrokerServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BrokerConfig) -> Result<Self, ServerError> {
        let targets = TargetTable::from_config(&config.services)?;
        let transport = HttpTransport::new(&config.downstream, &config.timeouts)?;

        for action in Action::ALL {
            let target = targets.get(action);
            tracing::info!(
                action = %action,
                url = %target.url,
                logic_error_status = target.logic_error_status.as_u16(),
                "Action target registered"
            );
        }

        let state = AppState {
            router: Arc::new(ActionRouter::new(targets, DownstreamClient::new(transport))),
            max_body_size: config.limits.max_body_size,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(health).post(health))
            .route("/handle", post(handle_submission).fallback(method_not_allowed))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(BrokerRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(X_REQUEST_ID)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("unknown");
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Static liveness envelope.
async fn health() -> EnvelopeResponse {
    EnvelopeResponse::new(StatusCode::OK, ResponseEnvelope::success("Hit the broker", None))
}

/// Decode the envelope, route it, write the outcome.
async fn handle_submission(State(state): State<AppState>, body: Body) -> EnvelopeResponse {
    let start = Instant::now();

    let (action, response) =
        match tokio::time::timeout(state.request_timeout, dispatch(&state, body)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let err = BrokerError::Timeout(state.request_timeout);
                tracing::warn!(error = %err, "Request deadline exceeded");
                ("timeout", EnvelopeResponse::from(&err))
            }
        };

    metrics::record_request(action, response.status.as_u16(), start);
    response
}

/// Read and route one request, returning the metrics label with the reply.
async fn dispatch(state: &AppState, body: Body) -> (&'static str, EnvelopeResponse) {
    let envelope = match read_envelope(body, state.max_body_size).await {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected undecodable request");
            return ("invalid", EnvelopeResponse::from(&BrokerError::from(e)));
        }
    };

    let action = envelope
        .action
        .parse::<Action>()
        .map(|a| a.as_str())
        .unwrap_or("unknown");

    let (status, reply) = state.router.respond(envelope).await;

    tracing::debug!(action, status = status.as_u16(), error = reply.error, "Request handled");
    (action, EnvelopeResponse::new(status, reply))
}

async fn method_not_allowed() -> EnvelopeResponse {
    EnvelopeResponse::failure(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn not_found() -> EnvelopeResponse {
    EnvelopeResponse::failure(StatusCode::NOT_FOUND, "not found")
}
