//! Data pulled out of the forum pages during one cycle.

use chrono::{DateTime, Utc};

/// Raw listing markup captured by one poll.
#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    /// Page markup as returned by the server
    pub markup: String,

    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl ListingSnapshot {
    pub fn new(markup: String) -> Self {
        Self {
            markup,
            fetched_at: Utc::now(),
        }
    }
}

/// The newest thread visible on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    /// Absolute thread URL; the identity used for novelty checks
    pub url: String,

    /// Anchor text, informational only
    pub label: String,
}

impl CandidateItem {
    /// Whether this item is the one recorded as `last_url`.
    ///
    /// Only the URL takes part; a relabelled thread is still the same thread.
    pub fn is_same_as(&self, last_url: Option<&str>) -> bool {
        last_url == Some(self.url.as_str())
    }
}

/// Title and cleaned body of a thread's first post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub title: String,
    pub body: String,
}

impl PostDetail {
    /// Stand-in used when the post page could not be fetched or read.
    pub fn degraded(placeholder: &str) -> Self {
        Self {
            title: String::new(),
            body: placeholder.to_string(),
        }
    }
}
