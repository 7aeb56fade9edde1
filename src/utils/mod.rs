//! Utility functions and helpers.

pub mod http;
pub mod text;

use url::Url;

use crate::error::Result;

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute hrefs come back unchanged (modulo normalization by `Url`).
pub fn resolve_url(base: &Url, href: &str) -> Result<String> {
    Ok(base.join(href.trim())?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html").unwrap(),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html").unwrap(),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x").unwrap(),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_against_php_page() {
        let base = Url::parse("https://x.test/forum.php").unwrap();
        assert_eq!(
            resolve_url(&base, "thread-1.html").unwrap(),
            "https://x.test/thread-1.html"
        );
        assert_eq!(
            resolve_url(&base, "forum.php?mod=viewthread&tid=7").unwrap(),
            "https://x.test/forum.php?mod=viewthread&tid=7"
        );
    }

    #[test]
    fn test_resolve_rejects_broken_href() {
        let base = Url::parse("https://x.test/forum.php").unwrap();
        assert!(resolve_url(&base, "http://[::1").is_err());
    }
}
