//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Every section is optional in the TOML file; missing values fall back to
/// the compiled-in defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What to watch and how often
    #[serde(default)]
    pub watch: WatchConfig,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// CSS selectors for the listing and post pages
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// Outgoing message layout
    #[serde(default)]
    pub message: MessageConfig,

    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path.as_ref());
                config
            }
            Err(e) => {
                log::warn!(
                    "Config load failed from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let listing = Url::parse(&self.watch.listing_url)
            .map_err(|e| AppError::validation(format!("watch.listing_url: {e}")))?;
        if !matches!(listing.scheme(), "http" | "https") {
            return Err(AppError::validation(
                "watch.listing_url must be an http(s) URL",
            ));
        }
        if self.watch.poll_interval_secs == 0 {
            return Err(AppError::validation("watch.poll_interval_secs must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.selectors.link_attr.trim().is_empty() {
            return Err(AppError::validation("selectors.link_attr is empty"));
        }
        if self.message.empty_body.trim().is_empty() {
            return Err(AppError::validation("message.empty_body must not be blank"));
        }
        if !self.message.template.contains("{link}") {
            return Err(AppError::validation(
                "message.template must contain {link}",
            ));
        }
        Url::parse(&self.telegram.api_base)
            .map_err(|e| AppError::validation(format!("telegram.api_base: {e}")))?;
        Ok(())
    }
}

/// Listing page and polling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Forum page listing the newest threads
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Pause between the end of one cycle and the start of the next
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            listing_url: defaults::listing_url(),
            poll_interval_secs: defaults::poll_interval(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// CSS selectors for scraping the forum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Thread link on the listing page; the first match is the newest thread
    #[serde(default = "defaults::item_selector")]
    pub item: String,

    /// Attribute holding the thread URL
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// Title anchor on the post page
    #[serde(default = "defaults::title_selector")]
    pub title: String,

    /// First message body on the post page
    #[serde(default = "defaults::body_selector")]
    pub body: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: defaults::item_selector(),
            link_attr: defaults::link_attr(),
            title: defaults::title_selector(),
            body: defaults::body_selector(),
        }
    }
}

/// Outgoing message settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Template with `{title}`, `{link}` and `{content}` placeholders
    #[serde(default = "defaults::template")]
    pub template: String,

    /// Body text used when the post page has no readable message
    #[serde(default = "defaults::empty_body")]
    pub empty_body: String,

    /// Maximum body length in characters; 0 keeps the whole body
    #[serde(default = "defaults::max_content_chars")]
    pub max_content_chars: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            template: defaults::template(),
            empty_body: defaults::empty_body(),
            max_content_chars: defaults::max_content_chars(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// API root, overridable for self-hosted Bot API servers
    #[serde(default = "defaults::api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
        }
    }
}

mod defaults {
    // Watch defaults
    pub fn listing_url() -> String {
        "https://fishc.com.cn/forum.php?mod=guide&view=newthread&mobile=2".into()
    }
    pub fn poll_interval() -> u64 {
        30
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; forumwatch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }

    // Selector defaults
    pub fn item_selector() -> String {
        "a.th_item".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn title_selector() -> String {
        "#myshares a".into()
    }
    pub fn body_selector() -> String {
        ".message".into()
    }

    // Message defaults
    pub fn template() -> String {
        "标题: {title}\n链接: {link}\n帖子内容: {content}".into()
    }
    pub fn empty_body() -> String {
        "未找到内容".into()
    }
    pub fn max_content_chars() -> usize {
        3000
    }

    // Telegram defaults
    pub fn api_base() -> String {
        "https://api.telegram.org".into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_interval_is_thirty_seconds() {
        assert_eq!(Config::default().watch.poll_interval_secs, 30);
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = Config::default();
        config.watch.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_listing_url() {
        let mut config = Config::default();
        config.watch.listing_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.watch.listing_url = "ftp://x.test/forum".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_placeholder() {
        let mut config = Config::default();
        config.message.empty_body = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_link() {
        let mut config = Config::default();
        config.message.template = "{title}: {content}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[watch]\npoll_interval_secs = 90\n\n[selectors]\nbody = \"div.post\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.watch.poll_interval_secs, 90);
        assert_eq!(config.watch.listing_url, defaults::listing_url());
        assert_eq!(config.selectors.body, "div.post");
        assert_eq!(config.selectors.item, "a.th_item");
        assert_eq!(config.message.empty_body, "未找到内容");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(config.watch.poll_interval_secs, 30);
    }

    #[test]
    fn present_file_is_used_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[watch]\npoll_interval_secs = 45").unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config.watch.poll_interval_secs, 45);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[watch\npoll_interval_secs = ").unwrap();
        let config = Config::load_or_default(file.path());
        assert_eq!(config.watch.poll_interval_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[watch\npoll_interval_secs = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(AppError::Toml(_))
        ));
    }
}
