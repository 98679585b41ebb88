//! Client resolution.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};

use super::{ProgressSink, ProgressUpdate};

/// Resolves an opaque client identifier to a live progress sink.
///
/// Passed into the relay as a dependency; the relay never assumes where
/// clients actually live.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Resolve `id` to an endpoint, or fail if no such client is known.
    async fn get(&self, id: &str) -> Result<Arc<dyn ProgressSink>>;
}

/// In-process registry backed by unbounded channels.
///
/// Each registered client owns the receiving half; the relay delivers
/// updates through the sending half.
pub struct ChannelRegistry {
    clients: RwLock<HashMap<String, mpsc::UnboundedSender<ProgressUpdate>>>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Register a client and return the receiving end of its channel.
    ///
    /// Registering an id twice replaces the previous channel.
    pub async fn register(&self, id: &str) -> mpsc::UnboundedReceiver<ProgressUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients.write().await.insert(id.to_owned(), tx);
        rx
    }

    /// Remove a client from the registry.
    pub async fn unregister(&self, id: &str) {
        self.clients.write().await.remove(id);
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientRegistry for ChannelRegistry {
    async fn get(&self, id: &str) -> Result<Arc<dyn ProgressSink>> {
        let clients = self.clients.read().await;
        let tx = clients
            .get(id)
            .ok_or_else(|| anyhow!("unknown client id: {id}"))?
            .clone();
        Ok(Arc::new(ChannelClient { tx }))
    }
}

/// Sink half of a registered client channel.
struct ChannelClient {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ProgressSink for ChannelClient {
    fn send_progress(&self, update: ProgressUpdate) {
        // The receiver may already be gone; delivery is best-effort
        let _ = self.tx.send(update);
    }
}
