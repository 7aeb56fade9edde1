// src/models/mod.rs

//! Domain models for the watcher.

mod config;
mod item;
mod message;
mod target;

// Re-export all public types
pub use config::{Config, HttpConfig, MessageConfig, SelectorConfig, TelegramConfig, WatchConfig};
pub use item::{CandidateItem, ListingSnapshot, PostDetail};
pub use message::NotificationMessage;
pub use target::{Credentials, WatchTarget};
