// src/utils/text.rs

//! Text cleanup helpers for extracted markup.

use unicode_segmentation::UnicodeSegmentation;

/// Collapse every whitespace run (spaces, tabs, newlines) into a single space
/// and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `s` down to at most `max_chars` grapheme clusters, appending an
/// ellipsis when something was removed.
///
/// A limit of zero disables truncation.
pub fn truncate_graphemes(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return s.to_string();
    }

    let mut graphemes = s.grapheme_indices(true);
    match graphemes.nth(max_chars) {
        Some((cut, _)) => format!("{}…", s[..cut].trim_end()),
        None => s.to_string(),
    }
}

/// Cut `s` so that it fits in `max_units` UTF-16 code units, ellipsis
/// included. Cuts fall on grapheme boundaries.
pub fn truncate_utf16(s: &str, max_units: usize) -> String {
    if s.encode_utf16().count() <= max_units {
        return s.to_string();
    }

    let budget = max_units.saturating_sub('…'.len_utf16());
    let mut used = 0;
    let mut cut = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        let units = grapheme.encode_utf16().count();
        if used + units > budget {
            break;
        }
        used += units;
        cut = idx + grapheme.len();
    }

    format!("{}…", &s[..cut])
}
