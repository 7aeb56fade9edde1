//! forumwatch CLI
//!
//! Watches the forum listing page and forwards new threads to Telegram until
//! interrupted with Ctrl-C.

use std::path::PathBuf;

use clap::Parser;
use forumwatch::{
    error::Result,
    models::{Config, Credentials},
    pipeline,
};
use tokio_util::sync::CancellationToken;

/// forumwatch - Forum new-thread notifier
#[derive(Parser, Debug)]
#[command(
    name = "forumwatch",
    version,
    about = "Relays new forum threads to a Telegram chat"
)]
struct Cli {
    /// Telegram Bot API token
    #[arg(long)]
    token: String,

    /// Telegram chat id receiving the notifications
    #[arg(long = "chatid", alias = "chat-id")]
    chat_id: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let credentials = match Credentials::new(cli.token, cli.chat_id) {
        Ok(credentials) => credentials,
        Err(e) => {
            log::error!("Both a bot token and a chat id are required: {}", e);
            return Err(e);
        }
    };

    let config = Config::load_or_default(&cli.config);

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::info!("Shutdown signal received"),
            Err(e) => {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
        }
        cancel_for_signal.cancel();
    });

    pipeline::run_watch(&config, &credentials, cancel).await?;

    log::info!("Done!");
    Ok(())
}
