//! Page-level text statistics.

use std::sync::LazyLock;

use scraper::Selector;

use crate::config::{TRUNCATION_MARKER, WORDS_PER_MINUTE};
use crate::parse::classify::{count_sentences, count_words};
use crate::parse::document::{element_text, ParsedDocument};
use crate::utils::{parse_selector_unsafe, truncate_with_marker};

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("p", "PARAGRAPH_SELECTOR"));

/// Visible text and the statistics measured on it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    /// Truncated to the configured limit with a trailing `...`
    pub text: String,
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub reading_time_minutes: usize,
}

/// Measures the visible text, then truncates it to `max_chars`.
///
/// Every count is taken on the full text. `paragraph_count` is the number of
/// `<p>` elements with non-blank text.
pub fn extract_page_text(document: &ParsedDocument, max_chars: usize) -> PageText {
    let full = document.visible_text();
    let word_count = count_words(&full);
    PageText {
        word_count,
        character_count: full.chars().count(),
        sentence_count: count_sentences(&full),
        paragraph_count: document
            .select(&PARAGRAPH_SELECTOR)
            .filter(|p| !element_text(*p).trim().is_empty())
            .count(),
        reading_time_minutes: word_count / WORDS_PER_MINUTE,
        text: truncate_with_marker(&full, max_chars, TRUNCATION_MARKER),
    }
}
