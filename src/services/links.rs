// src/services/links.rs

//! Newest-thread detection on the listing page.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CandidateItem, SelectorConfig};
use crate::services::parse_selector;
use crate::utils::resolve_url;
use crate::utils::text::normalize_whitespace;

/// Finds the newest item link on a listing page.
pub trait LinkExtractor: Send + Sync {
    /// Return the newest item, or `None` when the page shows no item.
    ///
    /// An empty page is not an error. `Err` is reserved for markup whose
    /// link cannot be turned into a URL.
    fn extract_newest_link(&self, markup: &str, base_url: &Url) -> Result<Option<CandidateItem>>;
}

/// `LinkExtractor` taking the first element matching a CSS selector.
pub struct SelectorLinkExtractor {
    item: Selector,
    link_attr: String,
}

impl SelectorLinkExtractor {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&selectors.item)?,
            link_attr: selectors.link_attr.clone(),
        })
    }
}

impl LinkExtractor for SelectorLinkExtractor {
    fn extract_newest_link(&self, markup: &str, base_url: &Url) -> Result<Option<CandidateItem>> {
        let document = Html::parse_document(markup);

        let Some(first) = document.select(&self.item).next() else {
            return Ok(None);
        };

        let href = match first.value().attr(&self.link_attr) {
            Some(href) if !href.trim().is_empty() => href,
            _ => {
                log::debug!("First listing item has no usable '{}'", self.link_attr);
                return Ok(None);
            }
        };

        let url = resolve_url(base_url, href)
            .map_err(|e| AppError::extract(format!("listing link '{href}'"), e))?;
        let label = normalize_whitespace(&first.text().collect::<String>());

        Ok(Some(CandidateItem { url, label }))
    }
}
