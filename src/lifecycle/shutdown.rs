//! Shutdown coordination for the broker.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals;

/// Stop handle shared by the server and whoever decides to stop it.
///
/// Clones share one channel: `trigger` on any clone reaches every subscriber.
#[derive(Debug, Clone)]
pub struct Shutdown {
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self { notify }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Stop every subscriber. Returns false if none was left.
    pub fn trigger(&self) -> bool {
        self.notify.send(()).is_ok()
    }

    /// Trigger on the first SIGINT or SIGTERM.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            signals::wait_for_signal().await;
            if !shutdown.trigger() {
                tracing::debug!("Signal received after the server stopped");
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
