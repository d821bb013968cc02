//! Extraction stage: one parsed document in, one `ScrapeResult` out.

use chrono::Utc;

use crate::config::ScrapeConfig;
use crate::error_handling::Diagnostics;
use crate::fetch::FetchResult;
use crate::models::ScrapeResult;
use crate::parse::{
    extract_content_blocks, extract_content_elements, extract_content_structure, extract_headings,
    extract_images, extract_links, extract_page_text, extract_seo_profile,
    extract_structured_data, extract_tables, meta_description, ParsedDocument,
};

/// Runs every extractor over `document`.
///
/// `seo_score` is left at 0; the caller scores the finished profile.
pub(crate) fn extract_result(
    requested_url: &str,
    fetch: &FetchResult,
    document: &ParsedDocument,
    config: &ScrapeConfig,
) -> ScrapeResult {
    let mut diagnostics = Diagnostics::new();

    let page_text = extract_page_text(document, config.text_content_max_chars);
    let headings = extract_headings(document, &mut diagnostics);
    let content_elements = extract_content_elements(document, &mut diagnostics);
    let content_blocks = extract_content_blocks(document);
    let links = extract_links(document, config.max_links);
    let images = extract_images(document, config.max_images);
    let tables = extract_tables(document, config.max_tables, &mut diagnostics);
    let structured_data = extract_structured_data(document, &document.visible_text(), &mut diagnostics);
    let content = extract_content_structure(document);
    let seo = extract_seo_profile(document, &headings, &links, &images);

    log::debug!(
        "Extracted {} headings, {} links, {} images, {} tables from {}",
        headings.len(),
        links.len(),
        images.len(),
        tables.len(),
        fetch.final_url
    );

    ScrapeResult {
        url: requested_url.to_string(),
        final_url: fetch.final_url.to_string(),
        title: document.title().unwrap_or_default(),
        description: meta_description(document),
        headings,
        links,
        images,
        tables,
        text_content: page_text.text,
        word_count: page_text.word_count,
        character_count: page_text.character_count,
        sentence_count: page_text.sentence_count,
        paragraph_count: page_text.paragraph_count,
        reading_time_minutes: page_text.reading_time_minutes,
        content_elements,
        content_blocks,
        structured_data,
        content,
        seo,
        seo_score: 0,
        scraped_at: Utc::now(),
        response_status: fetch.status,
        response_headers: fetch.headers.clone(),
        page_size_bytes: fetch.body.len(),
        load_time_seconds: fetch.elapsed.as_secs_f64(),
        diagnostics,
    }
}
