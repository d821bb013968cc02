//! Heading extraction and classification.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::config::{MAX_HEADING_TEXT_CHARS, TRUNCATION_MARKER};
use crate::error_handling::{Diagnostics, ExtractionSection};
use crate::models::{HeadingRecord, HeadingType};
use crate::parse::classify::{contains_any, count_words, HEADING_TAGS};
use crate::parse::document::{element_text, has_descendant, parent_tag, ElementAttrs, ParsedDocument};
use crate::utils::{
    compile_regex_unsafe, normalize, parse_selector_unsafe, parse_selector_with_fallback, truncate_within,
};

static HEADING_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    HEADING_TAGS
        .iter()
        .map(|&tag| (tag, parse_selector_with_fallback(tag, "heading walk")))
        .collect()
});
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a", "LINK_SELECTOR"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("img", "IMAGE_SELECTOR"));
static EMPHASIS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("strong, b, em, i", "EMPHASIS_SELECTOR"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"\d+", "DIGITS_RE"));
static SPECIAL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[^\w\s]", "SPECIAL_CHAR_RE"));

/// Keyword groups checked against the lower-cased heading text, in order.
const HEADING_KEYWORDS: &[(HeadingType, &[&str])] = &[
    (HeadingType::Introduction, &["about", "introduction", "overview"]),
    (HeadingType::Contact, &["contact", "get in touch", "reach out"]),
    (HeadingType::Services, &["service", "what we do", "offering"]),
    (HeadingType::Product, &["product", "features", "specification"]),
    (HeadingType::Content, &["news", "blog", "article", "post"]),
    (HeadingType::Team, &["team", "staff", "people", "member"]),
    (HeadingType::Testimonial, &["testimonial", "review", "feedback"]),
    (HeadingType::Faq, &["faq", "question", "help", "support"]),
    (HeadingType::Pricing, &["price", "cost", "plan", "package"]),
];

/// Purpose of a heading from its class, text and level (1..=6).
pub fn classify_heading_type(text: &str, level: u8, class: &str) -> HeadingType {
    if contains_any(class, &["nav", "menu"]) {
        return HeadingType::Navigation;
    }
    for (heading_type, keywords) in HEADING_KEYWORDS {
        if contains_any(text, keywords) {
            return *heading_type;
        }
    }
    if text.ends_with('?') {
        return HeadingType::Question;
    }
    match level {
        1 => HeadingType::MainTitle,
        2 | 3 => HeadingType::SectionTitle,
        _ => HeadingType::Subsection,
    }
}

/// True when the text has cased letters and none of them is lower-case.
fn is_all_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Accessibility score in [1, 10].
pub fn accessibility_score(text: &str, has_id: bool) -> u8 {
    let length = text.chars().count();
    let mut score: i32 = 5;
    if (10..=60).contains(&length) {
        score += 2;
    } else if length > 100 {
        score -= 2;
    }
    if has_id {
        score += 1;
    }
    if is_all_upper(text) {
        score -= 1;
    }
    if count_words(text) >= 3 {
        score += 1;
    }
    score.clamp(1, 10) as u8
}

fn heading_record(element: ElementRef<'_>, level: &str, level_number: u8, position: usize) -> Option<HeadingRecord> {
    let text = truncate_within(
        &normalize(&element_text(element)),
        MAX_HEADING_TEXT_CHARS,
        TRUNCATION_MARKER,
    );
    if text.is_empty() {
        return None;
    }

    let attrs = ElementAttrs::of(element);
    let element_id = attrs.id().to_string();
    let element_class = attrs.class_string();
    let word_count = count_words(&text);

    Some(HeadingRecord {
        level: level.to_string(),
        level_number,
        position_in_level: position,
        hierarchy_position: format!("{level_number}.{position}"),
        text_length: text.chars().count(),
        word_count,
        parent_element: parent_tag(element),
        heading_type: classify_heading_type(&text, level_number, &element_class),
        has_id: !element_id.is_empty(),
        has_class: !element_class.is_empty(),
        has_links: has_descendant(element, &LINK_SELECTOR),
        has_emphasis: has_descendant(element, &EMPHASIS_SELECTOR),
        has_images: has_descendant(element, &IMAGE_SELECTOR),
        has_numbers: DIGITS_RE.is_match(&text),
        has_special_chars: SPECIAL_CHAR_RE.is_match(&text),
        is_question: text.ends_with('?'),
        is_seo_friendly: (10..=60).contains(&word_count),
        accessibility_score: accessibility_score(&text, !element_id.is_empty()),
        element_id,
        element_class,
        text,
    })
}

/// Every non-empty heading, grouped by level (`h1` first) and in document
/// order within a level.
///
/// `position_in_level` counts empty headings too, so it always matches the
/// element's index among same-level headings in the page.
pub fn extract_headings(document: &ParsedDocument, diagnostics: &mut Diagnostics) -> Vec<HeadingRecord> {
    let mut headings = Vec::new();
    let mut skipped = 0;
    for (level_number, (tag, selector)) in (1u8..).zip(HEADING_SELECTORS.iter()) {
        for (index, element) in document.select(selector).enumerate() {
            match heading_record(element, tag, level_number, index + 1) {
                Some(record) => headings.push(record),
                None => skipped += 1,
            }
        }
    }
    if skipped > 0 {
        diagnostics.warn(
            ExtractionSection::Headings,
            format!("{skipped} heading(s) without text skipped"),
        );
    }
    headings
}
