//! Page structure: navigation, breadcrumbs, lists, code, quotes and `data-*`
//! carriers.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use scraper::node::Element;
use scraper::{ElementRef, Selector};

use crate::config::{
    MAX_CODE_BLOCKS, MAX_DATA_ATTRIBUTE_ELEMENTS, MAX_DATA_ATTRIBUTE_TEXT_CHARS, MAX_LISTS,
    TRUNCATION_MARKER,
};
use crate::models::{
    CodeBlock, ContentStructure, DataAttributeElement, ListItem, ListKind, ListRecord, NavItem,
    QuoteRecord,
};
use crate::parse::document::{element_text, ElementAttrs, ParsedDocument};
use crate::utils::{parse_selector_unsafe, truncate_with_marker};

static NAVIGATION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("nav, ul.nav, ol.nav", "NAVIGATION_SELECTOR"));
static BREADCRUMB_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(
        r#"[class*="breadcrumb"], [id*="breadcrumb"], .breadcrumbs, nav[aria-label]"#,
        "BREADCRUMB_SELECTOR",
    )
});
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("a", "LINK_SELECTOR"));
static LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("ul, ol, dl", "LIST_SELECTOR"));
static LI_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("li", "LI_SELECTOR"));
static DT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("dt", "DT_SELECTOR"));
static DD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("dd", "DD_SELECTOR"));
static CODE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("code, pre", "CODE_SELECTOR"));
static QUOTE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("blockquote, q", "QUOTE_SELECTOR"));
static ANY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("*", "ANY_SELECTOR"));

fn trimmed_text(element: ElementRef<'_>) -> String {
    element_text(element).trim().to_string()
}

fn nav_items(container: ElementRef<'_>) -> Vec<NavItem> {
    container
        .select(&LINK_SELECTOR)
        .map(|link| {
            let attrs = ElementAttrs::of(link);
            NavItem {
                text: trimmed_text(link),
                href: attrs.value_or_empty("href"),
                title: attrs.value_or_empty("title"),
            }
        })
        .collect()
}

/// Links of every `<nav>` and of `ul`/`ol` elements classed `nav`.
fn extract_navigation(document: &ParsedDocument) -> Vec<Vec<NavItem>> {
    document
        .select(&NAVIGATION_SELECTOR)
        .map(nav_items)
        .filter(|items| !items.is_empty())
        .collect()
}

fn is_breadcrumb(element: ElementRef<'_>) -> bool {
    let attrs = ElementAttrs::of(element);
    let label_matches = element.value().name() == "nav"
        && attrs
            .get("aria-label")
            .is_some_and(|label| label.to_lowercase().contains("breadcrumb"));
    label_matches
        || attrs.get("class").is_some_and(|c| c.contains("breadcrumb"))
        || attrs.id().contains("breadcrumb")
}

/// Breadcrumb trails, each container reported once even when it matches
/// several breadcrumb patterns.
fn extract_breadcrumbs(document: &ParsedDocument) -> Vec<Vec<NavItem>> {
    let mut seen: HashSet<*const Element> = HashSet::new();
    document
        .select(&BREADCRUMB_SELECTOR)
        .filter(|element| is_breadcrumb(*element) && seen.insert(element.value()))
        .map(nav_items)
        .filter(|items| !items.is_empty())
        .collect()
}

fn list_record(list: ElementRef<'_>) -> Option<ListRecord> {
    let (kind, items) = match list.value().name() {
        "dl" => {
            let items = list
                .select(&DT_SELECTOR)
                .zip(list.select(&DD_SELECTOR))
                .map(|(term, description)| ListItem::Definition {
                    term: trimmed_text(term),
                    description: trimmed_text(description),
                })
                .collect::<Vec<_>>();
            (ListKind::Definition, items)
        }
        tag => {
            let kind = if tag == "ol" { ListKind::Ordered } else { ListKind::Unordered };
            let items = list
                .select(&LI_SELECTOR)
                .map(|li| ListItem::Text(trimmed_text(li)))
                .collect();
            (kind, items)
        }
    };
    (!items.is_empty()).then_some(ListRecord { kind, items })
}

fn extract_lists(document: &ParsedDocument) -> Vec<ListRecord> {
    document
        .select(&LIST_SELECTOR)
        .take(MAX_LISTS)
        .filter_map(list_record)
        .collect()
}

fn extract_code_blocks(document: &ParsedDocument) -> Vec<CodeBlock> {
    document
        .select(&CODE_SELECTOR)
        .take(MAX_CODE_BLOCKS)
        .map(|code| CodeBlock {
            tag: code.value().name().to_string(),
            content: trimmed_text(code),
            language: ElementAttrs::of(code)
                .class_list()
                .first()
                .map(|c| c.to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn extract_quotes(document: &ParsedDocument) -> Vec<QuoteRecord> {
    document
        .select(&QUOTE_SELECTOR)
        .map(|quote| {
            let attrs = ElementAttrs::of(quote);
            QuoteRecord {
                text: trimmed_text(quote),
                cite: attrs.value_or_empty("cite"),
                author: attrs.value_or_empty("data-author"),
            }
        })
        .collect()
}

fn extract_data_attributes(document: &ParsedDocument) -> Vec<DataAttributeElement> {
    document
        .select(&ANY_SELECTOR)
        .filter_map(|element| {
            let attributes: BTreeMap<String, String> = ElementAttrs::of(element)
                .data_attributes()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            (!attributes.is_empty()).then(|| DataAttributeElement {
                tag: element.value().name().to_string(),
                text: truncate_with_marker(
                    &trimmed_text(element),
                    MAX_DATA_ATTRIBUTE_TEXT_CHARS,
                    TRUNCATION_MARKER,
                ),
                attributes,
            })
        })
        .take(MAX_DATA_ATTRIBUTE_ELEMENTS)
        .collect()
}

/// Collects the page's structural elements.
///
/// Lists and code blocks are capped at the first ten found, `data-*`
/// carriers at twenty.
pub fn extract_content_structure(document: &ParsedDocument) -> ContentStructure {
    ContentStructure {
        navigation: extract_navigation(document),
        breadcrumbs: extract_breadcrumbs(document),
        lists: extract_lists(document),
        code_blocks: extract_code_blocks(document),
        quotes: extract_quotes(document),
        data_attributes: extract_data_attributes(document),
    }
}
