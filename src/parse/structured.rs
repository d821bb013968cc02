//! Machine-readable markup: JSON-LD, microdata, meta tags and social cards.
//!
//! Every extractor here works per element. A malformed element is reported
//! to [`Diagnostics`] and skipped; the rest of the section is still returned.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::Selector;

use crate::error_handling::{Diagnostics, ExtractionSection};
use crate::models::{MetaTag, MicrodataItem, StructuredData};
use crate::parse::contact::extract_contact_info;
use crate::parse::document::{element_text, ElementAttrs, ParsedDocument};
use crate::parse::forms::{extract_forms, extract_media};
use crate::utils::{parse_selector_unsafe, truncate_message};

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[type]", "SCRIPT_SELECTOR"));
static ITEMSCOPE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("[itemscope]", "ITEMSCOPE_SELECTOR"));
static ITEMPROP_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("[itemprop]", "ITEMPROP_SELECTOR"));
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("meta", "META_SELECTOR"));

const JSON_LD_TYPE: &str = "application/ld+json";

/// Open Graph keys, matched on the `property` attribute.
pub const OPEN_GRAPH_KEYS: &[&str] = &["og:title", "og:description", "og:image", "og:url", "og:type"];

/// Twitter Card keys, matched on the `name` attribute.
pub const TWITTER_CARD_KEYS: &[&str] = &[
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
];

/// Runs every structured-data extractor over the document.
///
/// `page_text` is the visible text the contact scanner searches.
pub fn extract_structured_data(
    document: &ParsedDocument,
    page_text: &str,
    diagnostics: &mut Diagnostics,
) -> StructuredData {
    StructuredData {
        json_ld: extract_json_ld(document, diagnostics),
        microdata: extract_microdata(document),
        meta_tags: extract_meta_tags(document),
        social_media: extract_social_media(document),
        contact_info: extract_contact_info(page_text),
        forms: extract_forms(document),
        media: extract_media(document),
    }
}

/// Parses each `<script type="application/ld+json">` block.
///
/// The type is compared case-insensitively. A block holding an array stays
/// one value; blocks that are not valid JSON are skipped with a warning.
pub fn extract_json_ld(document: &ParsedDocument, diagnostics: &mut Diagnostics) -> Vec<serde_json::Value> {
    let mut blocks = Vec::new();
    for script in document.select(&SCRIPT_SELECTOR) {
        let is_json_ld = ElementAttrs::of(script)
            .get("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_TYPE));
        if !is_json_ld {
            continue;
        }
        let body = element_text(script);
        if body.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<serde_json::Value>(body.trim()) {
            Ok(value) => blocks.push(value),
            Err(e) => diagnostics.warn(
                ExtractionSection::JsonLd,
                format!("malformed JSON-LD block skipped: {}", truncate_message(&e.to_string(), 120)),
            ),
        }
    }
    blocks
}

/// One item per `[itemscope]` element that carries at least one property.
///
/// A property's value is its trimmed text, else its `content`, else its `src`.
/// Nested scopes also contribute their properties to the enclosing item.
pub fn extract_microdata(document: &ParsedDocument) -> Vec<MicrodataItem> {
    let mut items = Vec::new();
    for scope in document.select(&ITEMSCOPE_SELECTOR) {
        let mut properties = BTreeMap::new();
        for prop in scope.select(&ITEMPROP_SELECTOR) {
            let attrs = ElementAttrs::of(prop);
            let Some(name) = attrs.get("itemprop").filter(|n| !n.is_empty()) else {
                continue;
            };
            let text = element_text(prop);
            let value = match text.trim() {
                "" => attrs
                    .get("content")
                    .or_else(|| attrs.src())
                    .unwrap_or_default()
                    .to_string(),
                trimmed => trimmed.to_string(),
            };
            properties.insert(name.to_string(), value);
        }
        if !properties.is_empty() {
            items.push(MicrodataItem {
                item_type: ElementAttrs::of(scope).get("itemtype").map(str::to_string),
                properties,
            });
        }
    }
    items
}

/// Every `<meta>` with a key and non-empty `content`.
///
/// The key is the first non-empty of `name`, `property` and `http-equiv`.
pub fn extract_meta_tags(document: &ParsedDocument) -> Vec<MetaTag> {
    document
        .select(&META_SELECTOR)
        .filter_map(|meta| {
            let attrs = ElementAttrs::of(meta);
            let name = ["name", "property", "http-equiv"]
                .iter()
                .filter_map(|key| attrs.get(key))
                .find(|value| !value.is_empty())?;
            let content = attrs.get("content").filter(|c| !c.is_empty())?;
            Some(MetaTag {
                name: name.to_string(),
                content: content.to_string(),
            })
        })
        .collect()
}

/// Open Graph and Twitter Card values for the fixed key set.
///
/// Only the first `<meta>` carrying each key is consulted; if its content is
/// empty the key is left out.
pub fn extract_social_media(document: &ParsedDocument) -> BTreeMap<String, String> {
    let metas: Vec<ElementAttrs<'_>> = document.select(&META_SELECTOR).map(ElementAttrs::of).collect();
    let mut social = BTreeMap::new();

    let lookups = OPEN_GRAPH_KEYS
        .iter()
        .map(|key| ("property", *key))
        .chain(TWITTER_CARD_KEYS.iter().map(|key| ("name", *key)));
    for (attribute, key) in lookups {
        let content = metas
            .iter()
            .find(|meta| meta.get(attribute) == Some(key))
            .and_then(|meta| meta.get("content"))
            .filter(|content| !content.is_empty());
        if let Some(content) = content {
            social.insert(key.to_string(), content.to_string());
        }
    }
    social
}
