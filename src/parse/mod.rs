//! HTML parsing and data extraction.
//!
//! This module turns one parsed page into the records of a `ScrapeResult`:
//! - Content elements, headings and content blocks, each classified
//! - Links, images and tables
//! - Structured data (JSON-LD, microdata, meta tags, social cards, contacts,
//!   forms, media)
//! - Page structure (navigation, breadcrumbs, lists, code, quotes)
//! - The on-page SEO profile
//!
//! All parsing is done using CSS selectors via the `scraper` crate. Every
//! extractor reads the shared [`ParsedDocument`]; none of them fails the
//! scrape.

mod blocks;
mod classify;
mod contact;
mod content;
mod document;
mod forms;
mod headings;
mod links;
mod seo;
mod structured;
mod tables;
mod text;

// Re-export public API
pub use blocks::{block_importance, classify_block_type, extract_content_blocks};
pub use classify::{classify, classify_content_type, extract_content_elements, importance_score, CONTENT_TAGS};
pub use contact::extract_contact_info;
pub use content::extract_content_structure;
pub use document::{ElementAttrs, ParsedDocument};
pub use forms::{extract_forms, extract_media};
pub use headings::{accessibility_score, classify_heading_type, extract_headings};
pub use links::{extract_images, extract_links, link_scope};
pub use seo::{extract_seo_profile, meta_description};
pub use structured::{
    extract_json_ld, extract_meta_tags, extract_microdata, extract_social_media,
    extract_structured_data, OPEN_GRAPH_KEYS, TWITTER_CARD_KEYS,
};
pub use tables::{extract_tables, table_record};
pub use text::{extract_page_text, PageText};
