//! Notification targets for progress updates.

pub mod registry;

pub use registry::{ChannelRegistry, ClientRegistry};

use serde::{Deserialize, Serialize};

/// A single progress notification.
///
/// This is the whole wire contract: cumulative bytes forwarded so far and
/// the declared total for the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub loaded: u64,
    pub total: u64,
}

/// A resolved endpoint that receives progress updates.
///
/// Dispatch is fire-and-forget: a sink must never block the read loop.
pub trait ProgressSink: Send + Sync {
    /// Deliver one progress update.
    fn send_progress(&self, update: ProgressUpdate);
}
