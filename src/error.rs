// src/error.rs

//! Unified error handling for the watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Notification sink rejected the message
    #[error("Notification rejected with status {status}: {body}")]
    Notify { status: u16, body: String },

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Markup could not be turned into the expected fields
    #[error("Extract error for {context}: {message}")]
    Extract { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction error with context.
    ///
    /// Returned by `LinkExtractor` and `PostExtractor` implementations when
    /// markup cannot be turned into an item; the monitor skips the item.
    pub fn extract(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            context: context.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_url() {
        let err = AppError::HttpStatus {
            url: "https://x.test/forum.php".to_string(),
            status: 503,
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("https://x.test/forum.php"));
    }

    #[test]
    fn test_selector_helper() {
        let err = AppError::selector("[[", "unexpected token");
        assert_eq!(
            err.to_string(),
            "Invalid selector '[[': unexpected token"
        );
    }
}
