//! In-memory transport for unit tests.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use reqwest::StatusCode;

use crate::downstream::transport::{OutboundRequest, ReplyBody, Transport, TransportError};

#[derive(Debug, Clone)]
enum Script {
    Reply(StatusCode, Vec<u8>),
    Fail(String),
}

/// Replays one scripted outcome for every request and records what it saw.
#[derive(Debug)]
pub struct MockTransport {
    script: Script,
    requests: Mutex<Vec<OutboundRequest>>,
    released: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn replying(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::with_script(Script::Reply(status, body.into()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_script(Script::Fail(message.to_string()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of reply bodies that were consumed.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Transport for MockTransport {
    type Reply = MockReply;

    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<Self::Reply, TransportError>> + Send {
        self.requests.lock().unwrap().push(request);
        let outcome = match &self.script {
            Script::Reply(status, body) => Ok(MockReply {
                status: *status,
                body: body.clone(),
                released: self.released.clone(),
            }),
            Script::Fail(message) => Err(TransportError::new(message.clone())),
        };
        async move { outcome }
    }
}

pub struct MockReply {
    status: StatusCode,
    body: Vec<u8>,
    released: Arc<AtomicUsize>,
}

impl ReplyBody for MockReply {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn into_bytes(self) -> impl Future<Output = Result<Bytes, TransportError>> + Send {
        self.released.fetch_add(1, Ordering::SeqCst);
        async move { Ok(Bytes::from(self.body)) }
    }
}
