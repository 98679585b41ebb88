//! Byte-progress relay for streamed HTTP responses.
//!
//! The relay wraps a response body so that every chunk is passed through
//! unchanged while cumulative `{loaded, total}` updates are delivered to a
//! client resolved from an opaque identifier.

pub mod client;
pub mod http;
pub mod relay;
pub mod response;

pub use client::{ChannelRegistry, ClientRegistry, ProgressSink, ProgressUpdate};
pub use http::HttpClient;
pub use relay::ProgressRelay;
pub use response::{ByteStream, StreamResponse};
