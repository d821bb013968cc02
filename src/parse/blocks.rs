//! Container-level content blocks.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::config::{BLOCK_PREVIEW_CHARS, MIN_CONTENT_BLOCK_CHARS, TRUNCATION_MARKER, WORDS_PER_MINUTE};
use crate::models::{BlockType, ContentBlock};
use crate::parse::classify::{contains_any, count_sentences, count_words};
use crate::parse::document::{element_text, has_descendant, ElementAttrs, ParsedDocument};
use crate::score::readability_score;
use crate::utils::{collapse_whitespace, normalize, parse_selector_unsafe, truncate_with_marker};

static CONTAINER_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(
        "article, section, main, div, aside, header, footer, nav, p, blockquote",
        "CONTAINER_SELECTOR",
    )
});
static ANY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("*", "ANY_SELECTOR"));
static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("p", "PARAGRAPH_SELECTOR"));
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("h1, h2, h3, h4, h5, h6", "HEADING_SELECTOR"));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("a", "LINK_SELECTOR"));
static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("img", "IMAGE_SELECTOR"));
static LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("ul, ol", "LIST_SELECTOR"));
static CONTROL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("button, input, form", "CONTROL_SELECTOR"));

/// Text phrases checked against the start of a block, in order.
const TEXT_BLOCK_TYPES: &[(BlockType, &[&str])] = &[
    (BlockType::About, &["about us", "our story", "who we are"]),
    (BlockType::Services, &["our services", "what we do", "services"]),
    (BlockType::Contact, &["contact us", "get in touch", "reach out"]),
    (BlockType::Products, &["our products", "products", "catalog"]),
];

/// Purpose of a block from its tag, class, id and opening text.
pub fn classify_block_type(tag: &str, class: &str, id: &str, text: &str) -> BlockType {
    if tag == "main" || contains_any(class, &["main"]) || contains_any(id, &["main"]) {
        return BlockType::MainContent;
    }
    if tag == "article" || contains_any(class, &["article"]) {
        return BlockType::Article;
    }
    if tag == "nav" || contains_any(class, &["nav", "menu", "breadcrumb"]) {
        return BlockType::Navigation;
    }
    if tag == "header" || contains_any(class, &["header", "banner", "hero"]) {
        return BlockType::Header;
    }
    if tag == "footer" || contains_any(class, &["footer"]) {
        return BlockType::Footer;
    }
    if tag == "aside" || contains_any(class, &["sidebar", "aside", "widget"]) {
        return BlockType::Sidebar;
    }
    if contains_any(class, &["form", "contact", "subscribe", "newsletter"]) {
        return BlockType::Form;
    }

    let sample: String = text.chars().take(BLOCK_PREVIEW_CHARS).collect();
    for (block_type, phrases) in TEXT_BLOCK_TYPES {
        if contains_any(&sample, phrases) {
            return *block_type;
        }
    }

    match tag {
        "section" => BlockType::Section,
        "div" => BlockType::ContentBlock,
        "p" => BlockType::Paragraph,
        "blockquote" => BlockType::Quote,
        _ => BlockType::GeneralContent,
    }
}

/// Block importance in [1, 10].
pub fn block_importance(tag: &str, class: &str, word_count: usize, heading_count: usize, link_count: usize) -> u8 {
    let mut score: f64 = match tag {
        "main" => 10.0,
        "article" => 9.0,
        "section" => 7.0,
        "header" | "p" => 6.0,
        "aside" | "nav" => 4.0,
        "footer" => 3.0,
        _ => 5.0,
    };

    if contains_any(class, &["main", "content", "primary"]) {
        score += 3.0;
    } else if contains_any(class, &["sidebar", "secondary", "widget"]) {
        score -= 2.0;
    } else if contains_any(class, &["footer", "copyright"]) {
        score -= 3.0;
    }

    if word_count > 100 {
        score += 2.0;
    } else if word_count > 50 {
        score += 1.0;
    } else if word_count < 10 {
        score -= 2.0;
    }

    if heading_count > 0 {
        score += 1.0;
    }
    if link_count > 0 {
        score += 0.5;
    }

    (score.trunc() as i32).clamp(1, 10) as u8
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn content_block(element: ElementRef<'_>, block_id: usize) -> Option<ContentBlock> {
    let raw = collapse_whitespace(&element_text(element));
    if raw.chars().count() < MIN_CONTENT_BLOCK_CHARS {
        return None;
    }
    let text = normalize(&raw);
    if text.is_empty() {
        return None;
    }

    let tag = element.value().name().to_string();
    let attrs = ElementAttrs::of(element);
    let element_id = attrs.id().to_string();
    let element_class = attrs.class_string();

    let heading_count = element.select(&HEADING_SELECTOR).count();
    let link_count = element.select(&LINK_SELECTOR).count();
    let list_count = element.select(&LIST_SELECTOR).count();

    let word_count = count_words(&text);
    let sentence_count = count_sentences(&text);
    let letters: usize = text.split_whitespace().map(|w| w.chars().count()).sum();
    let avg_word_length = letters as f64 / word_count.max(1) as f64;
    let avg_sentence_length = word_count as f64 / sentence_count.max(1) as f64;

    Some(ContentBlock {
        block_id,
        block_type: classify_block_type(&tag, &element_class, &element_id, &text),
        text_preview: truncate_with_marker(&text, BLOCK_PREVIEW_CHARS, TRUNCATION_MARKER),
        word_count,
        char_count: text.chars().count(),
        sentence_count,
        importance_score: block_importance(&tag, &element_class, word_count, heading_count, link_count),
        child_elements: element.select(&ANY_SELECTOR).count(),
        heading_count,
        paragraph_count: element.select(&PARAGRAPH_SELECTOR).count(),
        link_count,
        image_count: element.select(&IMAGE_SELECTOR).count(),
        list_count,
        has_structured_content: heading_count > 0 || list_count > 0,
        is_interactive: link_count > 0 || has_descendant(element, &CONTROL_SELECTOR),
        reading_time_minutes: word_count / WORDS_PER_MINUTE,
        avg_word_length: round2(avg_word_length),
        avg_sentence_length: round2(avg_sentence_length),
        readability_score: readability_score(avg_sentence_length, avg_word_length, word_count),
        tag,
        element_id,
        element_class,
    })
}

/// Analyses every container element in document order.
///
/// `block_id` is the 1-based index among all containers, so ids of skipped
/// short blocks leave gaps. Nested containers are each reported; an outer
/// `div` and the `p` inside it are two blocks.
pub fn extract_content_blocks(document: &ParsedDocument) -> Vec<ContentBlock> {
    document
        .select(&CONTAINER_SELECTOR)
        .enumerate()
        .filter_map(|(index, element)| content_block(element, index + 1))
        .collect()
}
