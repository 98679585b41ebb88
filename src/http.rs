//! HTTP client producing streamable responses.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::response::StreamResponse;

/// Thin fetch client with configured timeouts.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("progress-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url` and expose the response as a chunk stream.
    pub async fn get(&self, url: &str) -> Result<StreamResponse> {
        debug!("Fetching {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        Ok(StreamResponse::from(response))
    }
}
