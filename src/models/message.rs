//! Outgoing notification text.

use crate::models::{CandidateItem, PostDetail};
use crate::utils::text::truncate_graphemes;

/// A formatted summary of one new thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub title: String,
    pub link: String,
    pub content: String,
}

impl NotificationMessage {
    /// Combine a detected item with its post details.
    ///
    /// The link always comes from the candidate, never from the post page.
    pub fn new(item: &CandidateItem, post: PostDetail, max_content_chars: usize) -> Self {
        Self {
            title: post.title,
            link: item.url.clone(),
            content: truncate_graphemes(&post.body, max_content_chars),
        }
    }

    /// Render the message using a template.
    ///
    /// Supported placeholders: `{title}`, `{link}`, `{content}`. The template
    /// is scanned once, so braces inside field values are copied verbatim.
    /// Unknown `{...}` sequences are left as they are.
    pub fn format(&self, template: &str) -> String {
        let mut out = String::with_capacity(
            template.len() + self.title.len() + self.link.len() + self.content.len(),
        );
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            let field = tail.find('}').and_then(|end| {
                let value = match &tail[1..end] {
                    "title" => &self.title,
                    "link" => &self.link,
                    "content" => &self.content,
                    _ => return None,
                };
                Some((value, end))
            });

            match field {
                Some((value, end)) => {
                    out.push_str(value);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}
