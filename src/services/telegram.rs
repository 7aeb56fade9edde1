// src/services/telegram.rs

//! Telegram Bot API notification client

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{Credentials, TelegramConfig};
use crate::services::Notifier;
use crate::utils::text::truncate_utf16;

/// Upper bound on `sendMessage` text, counted in UTF-16 code units.
pub const MAX_MESSAGE_UTF16: usize = 4096;

/// Sends messages through a bot's `sendMessage` method.
pub struct TelegramNotifier {
    endpoint: String,
    client: Client,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, credentials: &Credentials, client: Client) -> Self {
        Self {
            endpoint: send_message_url(&config.api_base, &credentials.token),
            client,
        }
    }
}

fn send_message_url(api_base: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token)
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, recipient: &str, text: &str) -> Result<()> {
        let text = truncate_utf16(text, MAX_MESSAGE_UTF16);
        let params = [("chat_id", recipient), ("text", text.as_str())];

        log::debug!(
            "Sending Telegram message to {} ({} chars)",
            recipient,
            text.chars().count()
        );

        // The endpoint embeds the bot token; keep it out of transport errors.
        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Notify {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
