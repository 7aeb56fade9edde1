//! Service layer for the watcher.
//!
//! One module per external collaborator of the monitor loop:
//! - Page fetching (`HttpFetcher`)
//! - Newest-link detection (`SelectorLinkExtractor`)
//! - Post title/body extraction (`SelectorPostExtractor`)
//! - Message delivery (`TelegramNotifier`)

mod fetcher;
mod links;
mod notifier;
mod posts;
mod telegram;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use links::{LinkExtractor, SelectorLinkExtractor};
pub use notifier::Notifier;
pub use posts::{PostExtractor, SelectorPostExtractor};
pub use telegram::TelegramNotifier;

use scraper::Selector;

use crate::error::{AppError, Result};

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
pub(crate) mod testing {
    //! One-shot HTTP server for exercising the reqwest-backed services.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single request with `status` and `body`.
    ///
    /// Returns the server's base URL and a handle resolving to the raw
    /// request text.
    pub(crate) async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..head_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= head_end + 4 + length
    }
}
