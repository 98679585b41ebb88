//! Relay entry point: decides whether a response can be progress-tracked
//! and wraps it when it can.

use log::warn;
use std::sync::Arc;

use super::body::ProgressBody;
use crate::client::ClientRegistry;
use crate::response::StreamResponse;

/// Wraps responses so their download progress is reported to a client.
pub struct ProgressRelay {
    registry: Arc<dyn ClientRegistry>,
    debug: bool,
}

impl ProgressRelay {
    /// Create a relay that resolves clients through `registry`.
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self {
            registry,
            debug: false,
        }
    }

    /// Enable per-chunk read counter logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Return a response whose body is a byte-for-byte passthrough of
    /// `response` and which reports `{loaded, total}` to `client_id`
    /// after each forwarded chunk.
    ///
    /// The response is returned untouched when it cannot be tracked:
    /// no readable body stream, a non-success status, or a missing or
    /// unparseable `Content-Length` header.
    pub fn monitor(&self, client_id: &str, response: StreamResponse) -> StreamResponse {
        if !response.has_body() {
            warn!("No readable body stream available, progress will not be relayed");
            return response;
        }
        if !response.status().is_success() {
            // Error responses are not progress-tracked
            return response;
        }
        let Some(total) = response.content_length() else {
            warn!("No usable Content-Length header, progress will not be relayed");
            return response;
        };

        let (status, headers, body) = response.into_parts();
        let Some(source) = body else {
            // Body presence was checked above
            return StreamResponse::new(status, headers, None);
        };
        let body = ProgressBody::new(
            Arc::clone(&self.registry),
            client_id.to_owned(),
            source,
            total,
            self.debug,
        );
        StreamResponse::new(status, headers, Some(Box::pin(body)))
    }
}
