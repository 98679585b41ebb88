//! Response facade over status, headers and a consumable byte stream.

use anyhow::{Error, Result};
use bytes::Bytes;
use futures_util::{Stream, StreamExt, TryStreamExt};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use std::pin::Pin;

/// A boxed stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// An HTTP response whose body is consumed incrementally.
///
/// A `None` body means the transport could not provide a readable stream
/// for this response.
pub struct StreamResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<ByteStream>,
}

impl StreamResponse {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<ByteStream>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether a readable body stream is available.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// The declared body size, parsed from the `Content-Length` header.
    ///
    /// Returns `None` when the header is absent or not a decimal number.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }

    /// Split the response into status, headers and body stream.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Option<ByteStream>) {
        (self.status, self.headers, self.body)
    }

    /// Drain the body into a single buffer.
    pub async fn bytes(self) -> Result<Bytes> {
        let mut buffer = Vec::new();
        if let Some(mut body) = self.body {
            while let Some(chunk) = body.next().await {
                buffer.extend_from_slice(&chunk?);
            }
        }
        Ok(Bytes::from(buffer))
    }
}

impl From<reqwest::Response> for StreamResponse {
    fn from(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(Error::from).boxed();
        Self::new(status, headers, Some(body))
    }
}
