//! Forms and embedded media.

use std::sync::LazyLock;

use scraper::Selector;

use crate::config::MAX_MEDIA_PER_KIND;
use crate::models::{FormInput, FormRecord, MediaKind, MediaRecord};
use crate::parse::document::{ElementAttrs, ParsedDocument};
use crate::utils::parse_selector_unsafe;

static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("form", "FORM_SELECTOR"));
static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("input, textarea, select", "INPUT_SELECTOR"));
static SOURCE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("source[src]", "SOURCE_SELECTOR"));
static VIDEO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("video", "VIDEO_SELECTOR"));
static AUDIO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("audio", "AUDIO_SELECTOR"));
static IFRAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("iframe", "IFRAME_SELECTOR"));

/// Every `<form>` with its controls. `method` defaults to `GET`.
pub fn extract_forms(document: &ParsedDocument) -> Vec<FormRecord> {
    document
        .select(&FORM_SELECTOR)
        .map(|form| {
            let attrs = ElementAttrs::of(form);
            let inputs = form
                .select(&INPUT_SELECTOR)
                .map(|input| {
                    let input_attrs = ElementAttrs::of(input);
                    FormInput {
                        input_type: input_attrs
                            .get("type")
                            .unwrap_or_else(|| input.value().name())
                            .to_string(),
                        name: input_attrs.value_or_empty("name"),
                        id: input_attrs.value_or_empty("id"),
                        placeholder: input_attrs.value_or_empty("placeholder"),
                        required: input_attrs.has("required"),
                    }
                })
                .collect();
            FormRecord {
                action: attrs.value_or_empty("action"),
                method: attrs.get("method").unwrap_or("GET").to_string(),
                inputs,
            }
        })
        .collect()
}

fn selector_for(kind: MediaKind) -> &'static Selector {
    match kind {
        MediaKind::Video => &VIDEO_SELECTOR,
        MediaKind::Audio => &AUDIO_SELECTOR,
        MediaKind::Iframe => &IFRAME_SELECTOR,
    }
}

/// Up to ten each of `video`, `audio` and `iframe`, grouped by kind.
///
/// Video and audio without a `src` take the first `<source src>` child.
pub fn extract_media(document: &ParsedDocument) -> Vec<MediaRecord> {
    let mut media = Vec::new();
    for kind in [MediaKind::Video, MediaKind::Audio, MediaKind::Iframe] {
        for element in document.select(selector_for(kind)).take(MAX_MEDIA_PER_KIND) {
            let attrs = ElementAttrs::of(element);
            let src = match attrs.src() {
                Some(src) => src.to_string(),
                None if kind != MediaKind::Iframe => element
                    .select(&SOURCE_SELECTOR)
                    .next()
                    .and_then(|source| source.value().attr("src"))
                    .unwrap_or_default()
                    .to_string(),
                None => String::new(),
            };
            media.push(MediaRecord {
                kind,
                src,
                title: attrs.value_or_empty("title"),
                alt: attrs.value_or_empty("alt"),
                width: attrs.value_or_empty("width"),
                height: attrs.value_or_empty("height"),
            });
        }
    }
    media
}
