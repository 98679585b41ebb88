//! Downloads a URL through the progress relay and logs byte progress.

use anyhow::{Context, Result};
use log::{error, info};
use std::env;
use std::sync::Arc;

use progress_relay::{ChannelRegistry, HttpClient, ProgressRelay};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        error!("Usage: {} <url> [client-id]", args[0]);
        std::process::exit(1);
    }

    let url = &args[1];
    let client_id = args.get(2).map(String::as_str).unwrap_or("cli");

    if let Err(e) = run(url, client_id).await {
        error!("Download failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(url: &str, client_id: &str) -> Result<()> {
    let registry = Arc::new(ChannelRegistry::new());
    let mut updates = registry.register(client_id).await;

    let reporter = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            let percent = if update.total > 0 {
                update.loaded * 100 / update.total
            } else {
                0
            };
            info!("{percent}% ({}/{} bytes)", update.loaded, update.total);
        }
    });

    let client = HttpClient::new()?;
    let response = client.get(url).await?;

    let relay = ProgressRelay::new(registry.clone())
        .with_debug(log::log_enabled!(log::Level::Debug));
    let response = relay.monitor(client_id, response);

    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body from {url}"))?;
    info!("Downloaded {} bytes from {url}", body.len());

    registry.unregister(client_id).await;
    reporter.await?;
    Ok(())
}
