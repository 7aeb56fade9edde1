// src/services/posts.rs

//! Title and body extraction from a thread page.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{MessageConfig, PostDetail, SelectorConfig};
use crate::services::parse_selector;
use crate::utils::text::normalize_whitespace;

/// Reads the title and first message of a thread page.
pub trait PostExtractor: Send + Sync {
    /// The returned body is never empty.
    fn extract_post(&self, markup: &str) -> Result<PostDetail>;

    /// Body text used when nothing readable was found.
    fn placeholder(&self) -> &str;
}

/// `PostExtractor` driven by CSS selectors.
pub struct SelectorPostExtractor {
    title: Selector,
    body: Selector,
    empty_body: String,
}

impl SelectorPostExtractor {
    pub fn new(selectors: &SelectorConfig, message: &MessageConfig) -> Result<Self> {
        Ok(Self {
            title: parse_selector(&selectors.title)?,
            body: parse_selector(&selectors.body)?,
            empty_body: message.empty_body.clone(),
        })
    }
}

impl PostExtractor for SelectorPostExtractor {
    fn extract_post(&self, markup: &str) -> Result<PostDetail> {
        let document = Html::parse_document(markup);

        let title = document
            .select(&self.title)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let body = document
            .select(&self.body)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| self.empty_body.clone());

        Ok(PostDetail { title, body })
    }

    fn placeholder(&self) -> &str {
        &self.empty_body
    }
}
