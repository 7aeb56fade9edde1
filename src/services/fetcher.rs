// src/services/fetcher.rs

//! Page fetching over HTTP.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};

/// Source of raw page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body.
    ///
    /// Implementations apply their own timeout and never retry; a non-success
    /// status is an error and no body is returned with it.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `PageFetcher` backed by a reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wrap a client built by `create_async_client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpConfig;
    use crate::services::testing::serve_once;
    use crate::utils::http::create_async_client;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(create_async_client(&HttpConfig::default()).unwrap())
    }

    /// Port 1 is reserved and never bound, so connections are refused.
    const UNREACHABLE_URL: &str = "http://127.0.0.1:1/forum.php";

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let err = fetcher().fetch(UNREACHABLE_URL).await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let (base, request) = serve_once("200 OK", "<a class=\"th_item\">x</a>").await;

        let body = fetcher().fetch(&format!("{base}/forum.php")).await.unwrap();
        assert_eq!(body, "<a class=\"th_item\">x</a>");

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /forum.php"), "{request}");
        assert!(request.to_lowercase().contains("user-agent: mozilla/5.0 (compatible; forumwatch"));
    }

    #[tokio::test]
    async fn test_error_status_has_no_body() {
        let (base, _request) = serve_once("503 Service Unavailable", "busy").await;

        let url = format!("{base}/forum.php");
        let err = fetcher().fetch(&url).await.unwrap_err();
        match err {
            AppError::HttpStatus { url: failed, status } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("expected AppError::HttpStatus, got {other:?}"),
        }
    }
}
