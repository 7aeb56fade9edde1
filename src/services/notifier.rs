//! Notifier trait for relaying messages

use async_trait::async_trait;

use crate::error::Result;

/// Trait for delivering a text message to a recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send `text` to `recipient`.
    ///
    /// Any response other than success is an error.
    async fn notify(&self, recipient: &str, text: &str) -> Result<()>;
}
