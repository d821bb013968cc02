//! Content element classification: importance and semantic role.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::config::MIN_CONTENT_ELEMENT_CHARS;
use crate::error_handling::{Diagnostics, ExtractionSection};
use crate::models::{ContentElement, ContentType};
use crate::parse::document::{element_text, has_descendant, parent_tag, ElementAttrs, ParsedDocument};
use crate::utils::{compile_regex_unsafe, normalize, parse_selector_unsafe, parse_selector_with_fallback};

/// Tags walked for content elements, in output order.
pub const CONTENT_TAGS: &[&str] = &[
    "p", "div", "span", "article", "section", "main", "header", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6",
    "ul", "ol", "li", "dl", "dt", "dd",
    "blockquote", "q", "cite",
    "strong", "b", "em", "i", "mark", "small",
    "pre", "code", "kbd", "samp", "var",
    "a", "abbr", "acronym", "address",
    "table", "thead", "tbody", "tr", "th", "td",
    "figcaption", "caption", "summary", "details",
];

pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

static CONTENT_TAG_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> = LazyLock::new(|| {
    CONTENT_TAGS
        .iter()
        .map(|&tag| (tag, parse_selector_with_fallback(tag, "content tag walk")))
        .collect()
});
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a", "LINK_SELECTOR"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("img", "IMAGE_SELECTOR"));
static FORMATTING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("strong, b, em, i, mark", "FORMATTING_SELECTOR"));
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[.!?]+", "SENTENCE_END_RE"));

/// Case-insensitive substring match of any keyword.
pub(crate) fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    let lowered = haystack.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

/// Number of sentence-ending punctuation runs.
pub(crate) fn count_sentences(text: &str) -> usize {
    SENTENCE_END_RE.find_iter(text).count()
}

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn tag_importance(tag: &str) -> i32 {
    match tag {
        "h1" | "title" => 10,
        "h2" | "article" | "main" => 9,
        "h3" => 8,
        "h4" | "section" | "blockquote" | "summary" => 7,
        "h5" | "h6" | "p" | "strong" | "em" | "figcaption" | "caption" => 6,
        "span" => 4,
        _ => 5,
    }
}

/// Importance in [1, 10] from the tag, adjusted by class and id keywords.
pub fn importance_score(tag: &str, class: &str, id: &str) -> u8 {
    let mut score = tag_importance(tag);

    if !class.is_empty() {
        if contains_any(class, &["main", "content", "article", "post"]) {
            score += 2;
        } else if contains_any(class, &["sidebar", "footer", "nav", "menu"]) {
            score -= 2;
        } else if contains_any(class, &["title", "heading", "header"]) {
            score += 1;
        }
    }

    if !id.is_empty() {
        if contains_any(id, &["main", "content", "article"]) {
            score += 2;
        } else if contains_any(id, &["sidebar", "footer", "nav"]) {
            score -= 2;
        }
    }

    score.clamp(1, 10) as u8
}

/// Semantic role, first matching rule wins.
pub fn classify_content_type(tag: &str, text: &str, class: &str) -> ContentType {
    if HEADING_TAGS.contains(&tag) {
        return ContentType::Heading;
    }
    if contains_any(class, &["nav", "menu", "breadcrumb"]) {
        return ContentType::Navigation;
    }
    if contains_any(class, &["main", "content", "article", "post", "entry"]) {
        return ContentType::MainContent;
    }
    if contains_any(class, &["sidebar", "aside", "widget"]) {
        return ContentType::Sidebar;
    }
    if contains_any(class, &["footer", "copyright"]) {
        return ContentType::Footer;
    }
    if contains_any(class, &["header", "banner", "logo"]) {
        return ContentType::Header;
    }
    match tag {
        "form" | "input" | "button" | "select" | "textarea" => ContentType::Form,
        "ul" | "ol" | "li" | "dl" | "dt" | "dd" => ContentType::List,
        "blockquote" | "q" | "cite" => ContentType::Quote,
        "pre" | "code" | "kbd" | "samp" | "var" => ContentType::Code,
        "table" | "thead" | "tbody" | "tr" | "th" | "td" => ContentType::Table,
        "a" => ContentType::Link,
        "p" | "div" | "span" if text.chars().count() > 100 => ContentType::Paragraph,
        "p" | "div" | "span" => ContentType::ShortText,
        _ => ContentType::General,
    }
}

/// Builds a `ContentElement`, or `None` when the normalized text is shorter
/// than three characters.
pub fn classify(element: ElementRef<'_>, tag: &str, position: usize) -> Option<ContentElement> {
    let raw = element_text(element);
    if raw.trim().is_empty() {
        return None;
    }
    let text = normalize(&raw);
    if text.chars().count() < MIN_CONTENT_ELEMENT_CHARS {
        return None;
    }

    let attrs = ElementAttrs::of(element);
    let element_id = attrs.id().to_string();
    let element_class = attrs.class_string();
    let content_type = classify_content_type(tag, &text, &element_class);

    Some(ContentElement {
        tag: tag.to_string(),
        position,
        word_count: count_words(&text),
        char_count: text.chars().count(),
        sentence_count: count_sentences(&text),
        parent_tag: parent_tag(element),
        importance_score: importance_score(tag, &element_class, &element_id),
        content_type,
        has_links: has_descendant(element, &LINK_SELECTOR),
        has_images: has_descendant(element, &IMAGE_SELECTOR),
        has_formatting: has_descendant(element, &FORMATTING_SELECTOR),
        is_heading: HEADING_TAGS.contains(&tag),
        is_navigation: element_class.to_lowercase().contains("nav")
            || element_id.eq_ignore_ascii_case("nav"),
        is_main_content: content_type == ContentType::MainContent,
        element_id,
        element_class,
        text,
    })
}

/// Classifies every content-bearing element, tag by tag in `CONTENT_TAGS` order.
pub fn extract_content_elements(
    document: &ParsedDocument,
    diagnostics: &mut Diagnostics,
) -> Vec<ContentElement> {
    let mut elements = Vec::new();
    for (tag, selector) in CONTENT_TAG_SELECTORS.iter() {
        for (index, element) in document.select(selector).enumerate() {
            elements.extend(classify(element, tag, index + 1));
        }
    }
    if elements.is_empty() {
        diagnostics.warn(
            ExtractionSection::ContentElements,
            "no element carried at least three characters of text",
        );
    }
    elements
}
