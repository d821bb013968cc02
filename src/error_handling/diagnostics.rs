//! Per-invocation extraction diagnostics.
//!
//! Sub-extractors record recoverable problems here instead of failing the whole
//! scrape. Every entry is also emitted through `log::warn!`.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

/// Extraction sub-step a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIterMacro, Serialize)]
pub enum ExtractionSection {
    Document,
    Headings,
    ContentElements,
    ContentBlocks,
    JsonLd,
    Microdata,
    MetaTags,
    SocialMedia,
    Contact,
    Forms,
    Media,
    ContentStructure,
    Links,
    Images,
    Tables,
    Seo,
}

impl ExtractionSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSection::Document => "document",
            ExtractionSection::Headings => "headings",
            ExtractionSection::ContentElements => "content elements",
            ExtractionSection::ContentBlocks => "content blocks",
            ExtractionSection::JsonLd => "JSON-LD",
            ExtractionSection::Microdata => "microdata",
            ExtractionSection::MetaTags => "meta tags",
            ExtractionSection::SocialMedia => "social media",
            ExtractionSection::Contact => "contact info",
            ExtractionSection::Forms => "forms",
            ExtractionSection::Media => "media",
            ExtractionSection::ContentStructure => "content structure",
            ExtractionSection::Links => "links",
            ExtractionSection::Images => "images",
            ExtractionSection::Tables => "tables",
            ExtractionSection::Seo => "SEO profile",
        }
    }
}

/// A single recoverable extraction problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEntry {
    pub section: ExtractionSection,
    pub message: String,
}

/// Warnings collected during one scrape.
///
/// Counts are kept per section, initialized to zero for every section so
/// lookups never miss.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    entries: Vec<DiagnosticEntry>,
    counts: BTreeMap<ExtractionSection, usize>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        let counts = ExtractionSection::iter().map(|s| (s, 0)).collect();
        Diagnostics {
            entries: Vec::new(),
            counts,
        }
    }

    /// Records a warning for `section` and logs it.
    pub fn warn(&mut self, section: ExtractionSection, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{} extraction: {}", section.as_str(), message);
        *self.counts.entry(section).or_insert(0) += 1;
        self.entries.push(DiagnosticEntry { section, message });
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn count(&self, section: ExtractionSection) -> usize {
        self.counts.get(&section).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
