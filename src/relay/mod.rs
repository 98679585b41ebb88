//! Stream progress relay.
//!
//! Wraps a streamed HTTP response so that every body chunk is forwarded
//! unchanged while cumulative byte progress is reported to a client.

pub mod body;
pub mod monitor;

pub use body::ProgressBody;
pub use monitor::ProgressRelay;
