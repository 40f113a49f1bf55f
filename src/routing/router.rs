//! Action dispatch.
//!
//! # Responsibilities
//! - Turn a request envelope into exactly one downstream call
//! - Translate the outcome into a response envelope and status
//!
//! # Design Decisions
//! - Unknown actions fail before any downstream call is made
//! - First failure short-circuits; nothing is retried

use reqwest::StatusCode;

use crate::downstream::{DownstreamClient, HttpTransport, Transport};
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::BrokerError;
use crate::routing::action::{Dispatch, RoutingError};
use crate::routing::target::TargetTable;

/// Routes request envelopes to their downstream targets.
#[derive(Debug)]
pub struct ActionRouter<T = HttpTransport> {
    targets: TargetTable,
    client: DownstreamClient<T>,
}

impl<T: Transport> ActionRouter<T> {
    pub fn new(targets: TargetTable, client: DownstreamClient<T>) -> Self {
        Self { targets, client }
    }

    pub fn client(&self) -> &DownstreamClient<T> {
        &self.client
    }

    /// Dispatch `envelope` and return the success envelope or the first failure.
    pub async fn route(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, BrokerError> {
        let dispatch = match Dispatch::from_envelope(envelope) {
            Ok(dispatch) => dispatch,
            Err(e) => {
                let RoutingError::UnknownAction(action) = &e;
                tracing::warn!(action = %action, "Rejected unknown action");
                return Err(e.into());
            }
        };
        let target = self.targets.get(dispatch.action());

        let envelope = match &dispatch {
            Dispatch::Auth(credentials) => self.client.call(target, credentials).await?,
            Dispatch::Logger(entry) => self.client.call(target, entry).await?,
        };
        Ok(envelope)
    }

    /// Like [`route`](Self::route), but folds failures into an error envelope.
    pub async fn respond(&self, envelope: RequestEnvelope) -> (StatusCode, ResponseEnvelope) {
        match self.route(envelope).await {
            Ok(envelope) => (StatusCode::ACCEPTED, envelope),
            Err(e) => (e.status_code(), e.to_envelope()),
        }
    }
}
