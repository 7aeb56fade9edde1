// src/pipeline/monitor.rs

//! Poll–detect–notify loop.
//!
//! Each cycle fetches the listing page, picks the newest thread and, when its
//! URL differs from the last one notified, fetches the thread, formats a
//! summary and hands it to the notifier. Delivery is at-most-once: the item is
//! marked as seen before the notifier's result is looked at, so a failed send
//! is logged and never retried.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::models::{CandidateItem, ListingSnapshot, MessageConfig, NotificationMessage, PostDetail, WatchTarget};
use crate::services::{LinkExtractor, Notifier, PageFetcher, PostExtractor};

/// Memory carried from one cycle to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    last_notified_url: Option<String>,
}

impl MonitorState {
    /// State of a fresh process: nothing notified yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// State that treats `url` as already notified.
    pub fn with_last_notified(url: impl Into<String>) -> Self {
        Self {
            last_notified_url: Some(url.into()),
        }
    }

    pub fn last_notified_url(&self) -> Option<&str> {
        self.last_notified_url.as_deref()
    }

    fn mark_notified(&mut self, url: String) {
        self.last_notified_url = Some(url);
    }
}

/// What a single cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Listing page could not be fetched
    FetchFailed,
    /// Listing page was fetched but its newest link was unusable
    ExtractFailed,
    /// Listing page shows no item
    NoCandidate,
    /// Newest item was already notified
    Unchanged,
    /// A new item was sent to the notifier
    Notified { url: String, delivered: bool },
}

/// The external pieces the monitor drives.
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn PageFetcher>,
    pub links: Arc<dyn LinkExtractor>,
    pub posts: Arc<dyn PostExtractor>,
    pub notifier: Arc<dyn Notifier>,
}

/// Watches one listing page and reports each new thread once.
pub struct Monitor {
    target: WatchTarget,
    parts: Collaborators,
    message: MessageConfig,
    state: MonitorState,
}

impl Monitor {
    pub fn new(target: WatchTarget, parts: Collaborators, message: MessageConfig) -> Self {
        Self {
            target,
            parts,
            message,
            state: MonitorState::new(),
        }
    }

    /// Start from a given state instead of the empty one.
    pub fn with_state(mut self, state: MonitorState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run cycles until `cancel` fires.
    ///
    /// The interval is slept after each cycle finishes, so the real period is
    /// the interval plus however long the cycle took. Cancellation is observed
    /// between cycles and during the sleep, never in the middle of a cycle.
    pub async fn run(&mut self, cancel: CancellationToken) {
        log::info!(
            "Watching {} every {}s, notifying {} via {}",
            self.target.listing_url,
            self.target.poll_interval.as_secs(),
            self.target.recipient,
            self.parts.notifier.type_name()
        );

        while !cancel.is_cancelled() {
            let outcome = self.run_cycle().await;
            log::debug!("Cycle finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.target.poll_interval) => {}
                _ = cancel.cancelled() => break,
            }
        }

        log::info!("Monitor loop stopped");
    }

    /// Run one fetch–decide–notify pass.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let snapshot = match self.parts.fetcher.fetch(self.target.listing_url.as_str()).await {
            Ok(markup) => ListingSnapshot::new(markup),
            Err(e) => {
                log::warn!(
                    "Failed to fetch listing {}: {}",
                    self.target.listing_url,
                    e
                );
                return CycleOutcome::FetchFailed;
            }
        };

        let candidate = match self
            .parts
            .links
            .extract_newest_link(&snapshot.markup, &self.target.listing_url)
        {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                log::debug!(
                    "No item on listing {} (fetched {})",
                    self.target.listing_url,
                    snapshot.fetched_at
                );
                return CycleOutcome::NoCandidate;
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse listing {} (fetched {}): {}",
                    self.target.listing_url,
                    snapshot.fetched_at,
                    e
                );
                return CycleOutcome::ExtractFailed;
            }
        };

        if candidate.is_same_as(self.state.last_notified_url()) {
            log::debug!("Newest item unchanged: {}", candidate.url);
            return CycleOutcome::Unchanged;
        }

        log::info!("New item: {} ({})", candidate.label, candidate.url);
        self.notify_new_item(candidate).await
    }

    async fn notify_new_item(&mut self, candidate: CandidateItem) -> CycleOutcome {
        let post = self.read_post(&candidate.url).await;
        let message = NotificationMessage::new(&candidate, post, self.message.max_content_chars);
        let text = message.format(&self.message.template);

        let result = self
            .parts
            .notifier
            .notify(&self.target.recipient, &text)
            .await;

        // Marked before the result is inspected: a failed send is not retried.
        self.state.mark_notified(candidate.url.clone());

        let delivered = match result {
            Ok(()) => {
                log::info!(
                    "Sent {} via {}: {}",
                    candidate.url,
                    self.parts.notifier.type_name(),
                    text
                );
                true
            }
            Err(e) => {
                log::error!(
                    "Failed to send {} via {}: {}",
                    candidate.url,
                    self.parts.notifier.type_name(),
                    e
                );
                false
            }
        };

        CycleOutcome::Notified {
            url: candidate.url,
            delivered,
        }
    }

    /// Fetch and read a thread page, degrading instead of failing.
    async fn read_post(&self, url: &str) -> PostDetail {
        let placeholder = self.parts.posts.placeholder();

        let markup = match self.parts.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                log::warn!("Failed to fetch post {}: {}", url, e);
                return PostDetail::degraded(placeholder);
            }
        };

        match self.parts.posts.extract_post(&markup) {
            Ok(post) => post,
            Err(e) => {
                log::warn!("Failed to parse post {}: {}", url, e);
                PostDetail::degraded(placeholder)
            }
        }
    }
}
