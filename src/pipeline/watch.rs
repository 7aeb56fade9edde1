// src/pipeline/watch.rs

//! Wiring from configuration to a running monitor.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::{Config, Credentials, WatchTarget};
use crate::pipeline::monitor::{Collaborators, Monitor};
use crate::services::{HttpFetcher, SelectorLinkExtractor, SelectorPostExtractor, TelegramNotifier};
use crate::utils::http::create_async_client;

/// Build the monitor described by `config`.
///
/// Everything that can be wrong with the configuration fails here, before
/// any request is made.
pub fn build_monitor(config: &Config, credentials: &Credentials) -> Result<Monitor> {
    config.validate()?;

    let target = WatchTarget::new(config, credentials)?;
    let client = create_async_client(&config.http)?;

    let parts = Collaborators {
        fetcher: Arc::new(HttpFetcher::new(client.clone())),
        links: Arc::new(SelectorLinkExtractor::new(&config.selectors)?),
        posts: Arc::new(SelectorPostExtractor::new(&config.selectors, &config.message)?),
        notifier: Arc::new(TelegramNotifier::new(&config.telegram, credentials, client)),
    };

    Ok(Monitor::new(target, parts, config.message.clone()))
}

/// Run the watcher until `cancel` fires.
pub async fn run_watch(
    config: &Config,
    credentials: &Credentials,
    cancel: CancellationToken,
) -> Result<()> {
    let mut monitor = build_monitor(config, credentials)?;
    monitor.run(cancel).await;
    Ok(())
}
