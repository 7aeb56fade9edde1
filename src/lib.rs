// src/lib.rs

//! forumwatch Library
//!
//! Polls a forum listing page and relays each new thread to a Telegram chat.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
