//! Startup parameters that stay fixed for the life of the process.

use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Bot credentials supplied on the command line.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub chat_id: String,
}

impl Credentials {
    /// Reject empty credentials before anything touches the network.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Result<Self> {
        let token: String = token.into();
        let chat_id: String = chat_id.into();
        let token = token.trim().to_string();
        let chat_id = chat_id.trim().to_string();

        if token.is_empty() {
            return Err(AppError::config("bot token must not be empty"));
        }
        if chat_id.is_empty() {
            return Err(AppError::config("chat id must not be empty"));
        }
        Ok(Self { token, chat_id })
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// What the monitor watches and who it tells.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    pub listing_url: Url,
    pub poll_interval: Duration,
    pub recipient: String,
}

impl WatchTarget {
    pub fn new(config: &Config, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            listing_url: Url::parse(&config.watch.listing_url)?,
            poll_interval: Duration::from_secs(config.watch.poll_interval_secs),
            recipient: credentials.chat_id.clone(),
        })
    }
}
