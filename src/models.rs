//! Records produced by a scrape.
//!
//! Everything here is plain data: built fresh by one invocation, never mutated
//! after construction, and serialized by the export layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error_handling::Diagnostics;

/// Semantic role assigned to a content element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Heading,
    Navigation,
    MainContent,
    Sidebar,
    Footer,
    Header,
    Form,
    List,
    Quote,
    Code,
    Table,
    Link,
    Paragraph,
    ShortText,
    General,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Heading => "heading",
            ContentType::Navigation => "navigation",
            ContentType::MainContent => "main_content",
            ContentType::Sidebar => "sidebar",
            ContentType::Footer => "footer",
            ContentType::Header => "header",
            ContentType::Form => "form",
            ContentType::List => "list",
            ContentType::Quote => "quote",
            ContentType::Code => "code",
            ContentType::Table => "table",
            ContentType::Link => "link",
            ContentType::Paragraph => "paragraph",
            ContentType::ShortText => "short_text",
            ContentType::General => "general",
        }
    }
}

/// Purpose of a heading, inferred from its class, text and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingType {
    Navigation,
    Introduction,
    Contact,
    Services,
    Product,
    Content,
    Team,
    Testimonial,
    Faq,
    Pricing,
    Question,
    MainTitle,
    SectionTitle,
    Subsection,
}

impl HeadingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingType::Navigation => "navigation",
            HeadingType::Introduction => "introduction",
            HeadingType::Contact => "contact",
            HeadingType::Services => "services",
            HeadingType::Product => "product",
            HeadingType::Content => "content",
            HeadingType::Team => "team",
            HeadingType::Testimonial => "testimonial",
            HeadingType::Faq => "faq",
            HeadingType::Pricing => "pricing",
            HeadingType::Question => "question",
            HeadingType::MainTitle => "main_title",
            HeadingType::SectionTitle => "section_title",
            HeadingType::Subsection => "subsection",
        }
    }
}

/// Purpose of a container-level content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    MainContent,
    Article,
    Navigation,
    Header,
    Footer,
    Sidebar,
    Form,
    About,
    Services,
    Contact,
    Products,
    Section,
    ContentBlock,
    Paragraph,
    Quote,
    GeneralContent,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::MainContent => "main_content",
            BlockType::Article => "article",
            BlockType::Navigation => "navigation",
            BlockType::Header => "header",
            BlockType::Footer => "footer",
            BlockType::Sidebar => "sidebar",
            BlockType::Form => "form",
            BlockType::About => "about",
            BlockType::Services => "services",
            BlockType::Contact => "contact",
            BlockType::Products => "products",
            BlockType::Section => "section",
            BlockType::ContentBlock => "content_block",
            BlockType::Paragraph => "paragraph",
            BlockType::Quote => "quote",
            BlockType::GeneralContent => "general_content",
        }
    }
}

/// Where a link points relative to the page host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScope {
    /// Same host as the page
    Internal,
    /// A different http(s) host
    External,
    /// mailto:, tel:, javascript: and unresolvable hrefs
    Other,
}

impl LinkScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkScope::Internal => "internal",
            LinkScope::External => "external",
            LinkScope::Other => "other",
        }
    }
}

/// A text-bearing element with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct ContentElement {
    pub tag: String,
    pub text: String,
    /// 1-based index among elements with the same tag
    pub position: usize,
    pub word_count: usize,
    pub char_count: usize,
    pub element_id: String,
    pub element_class: String,
    pub parent_tag: String,
    /// In [1, 10]
    pub importance_score: u8,
    pub content_type: ContentType,
    pub has_links: bool,
    pub has_images: bool,
    pub has_formatting: bool,
    pub is_heading: bool,
    pub is_navigation: bool,
    pub is_main_content: bool,
    pub sentence_count: usize,
}

/// One `h1`..`h6` element.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingRecord {
    /// `h1`..`h6`
    pub level: String,
    pub level_number: u8,
    pub position_in_level: usize,
    /// `"<level>.<position>"`, e.g. `2.3`
    pub hierarchy_position: String,
    pub text: String,
    pub text_length: usize,
    pub word_count: usize,
    pub element_id: String,
    pub element_class: String,
    pub parent_element: String,
    pub heading_type: HeadingType,
    pub has_id: bool,
    pub has_class: bool,
    pub has_links: bool,
    pub has_emphasis: bool,
    pub has_images: bool,
    pub has_numbers: bool,
    pub has_special_chars: bool,
    pub is_question: bool,
    pub is_seo_friendly: bool,
    /// In [1, 10]
    pub accessibility_score: u8,
}

/// A container element analysed as a unit of content.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBlock {
    pub block_id: usize,
    pub tag: String,
    pub block_type: BlockType,
    pub text_preview: String,
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub element_id: String,
    pub element_class: String,
    /// In [1, 10]
    pub importance_score: u8,
    pub child_elements: usize,
    pub heading_count: usize,
    pub paragraph_count: usize,
    pub link_count: usize,
    pub image_count: usize,
    pub list_count: usize,
    pub has_structured_content: bool,
    pub is_interactive: bool,
    pub reading_time_minutes: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    /// 0 when there is too little text, otherwise in [1, 10]
    pub readability_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    pub text: String,
    pub href: String,
    pub resolved_url: Option<String>,
    pub title: String,
    pub target: String,
    pub rel: String,
    pub class: String,
    pub scope: LinkScope,
    pub position: usize,
}

impl LinkRecord {
    pub fn is_external(&self) -> bool {
        self.scope == LinkScope::External
    }

    pub fn opens_new_tab(&self) -> bool {
        self.target == "_blank"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    /// Empty when the attribute is missing
    pub alt: String,
    /// `src`, or `data-src` for lazy-loaded images
    pub src: String,
    pub resolved_src: Option<String>,
    pub title: String,
    pub width: String,
    pub height: String,
    pub loading: String,
    pub class: String,
    pub position: usize,
    pub has_alt: bool,
}

impl ImageRecord {
    pub fn has_dimensions(&self) -> bool {
        !self.width.is_empty() || !self.height.is_empty()
    }

    pub fn is_lazy_loaded(&self) -> bool {
        self.loading.eq_ignore_ascii_case("lazy")
    }
}

/// A table with rows aligned to `headers`.
#[derive(Debug, Clone, Serialize)]
pub struct TableRecord {
    /// 1-based index among the page's tables
    pub table_id: usize,
    pub headers: Vec<String>,
    /// Every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
    pub has_headers: bool,
    pub caption: String,
}

impl TableRecord {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Row `index` as ordered `(column, value)` pairs.
    pub fn row_record(&self, index: usize) -> Option<Vec<(&str, &str)>> {
        self.rows.get(index).map(|row| {
            self.headers
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MicrodataItem {
    pub item_type: Option<String>,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormInput {
    /// Explicit `type`, else the tag name
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormRecord {
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Audio,
    Iframe,
}

impl MediaKind {
    pub fn tag(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Iframe => "iframe",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaRecord {
    pub kind: MediaKind,
    pub src: String,
    pub title: String,
    pub alt: String,
    pub width: String,
    pub height: String,
}

/// Machine-readable markup found on the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuredData {
    pub json_ld: Vec<serde_json::Value>,
    pub microdata: Vec<MicrodataItem>,
    pub meta_tags: Vec<MetaTag>,
    /// Fixed Open Graph and Twitter Card keys, e.g. `og:title`
    pub social_media: BTreeMap<String, String>,
    pub contact_info: ContactInfo,
    pub forms: Vec<FormRecord>,
    pub media: Vec<MediaRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub text: String,
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Unordered,
    Ordered,
    Definition,
}

impl ListKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
            ListKind::Definition => "dl",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Definition { term: String, description: String },
}

impl ListItem {
    /// Character length used for list statistics.
    pub fn char_len(&self) -> usize {
        match self {
            ListItem::Text(text) => text.chars().count(),
            ListItem::Definition { term, description } => {
                term.chars().count() + description.chars().count()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRecord {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
}

impl ListRecord {
    pub fn average_item_length(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: usize = self.items.iter().map(ListItem::char_len).sum();
        total as f64 / self.items.len() as f64
    }

    pub fn has_long_items(&self) -> bool {
        self.items.iter().any(|item| item.char_len() > 100)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeBlock {
    pub tag: String,
    pub content: String,
    /// First class name, which is where highlighters put the language
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRecord {
    pub text: String,
    pub cite: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataAttributeElement {
    pub tag: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

/// Navigation, lists, code, quotes and `data-*` carriers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentStructure {
    pub navigation: Vec<Vec<NavItem>>,
    pub breadcrumbs: Vec<Vec<NavItem>>,
    pub lists: Vec<ListRecord>,
    pub code_blocks: Vec<CodeBlock>,
    pub quotes: Vec<QuoteRecord>,
    pub data_attributes: Vec<DataAttributeElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hreflang {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageLoadHints {
    pub preload: usize,
    pub prefetch: usize,
}

/// Heading counts per level, `h1` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingStructure {
    pub counts: [usize; 6],
}

impl HeadingStructure {
    pub fn from_records(headings: &[HeadingRecord]) -> Self {
        let mut counts = [0; 6];
        for heading in headings {
            if let Some(slot) = (heading.level_number as usize)
                .checked_sub(1)
                .and_then(|i| counts.get_mut(i))
            {
                *slot += 1;
            }
        }
        HeadingStructure { counts }
    }

    /// Count for `level` in 1..=6, 0 otherwise.
    pub fn count(&self, level: u8) -> usize {
        (level as usize)
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// On-page SEO signals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeoProfile {
    pub title_tag: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub canonical_url: String,
    pub robots: String,
    pub lang: String,
    pub hreflang: Vec<Hreflang>,
    pub heading_structure: HeadingStructure,
    pub internal_links: usize,
    pub external_links: usize,
    pub images_with_alt: usize,
    pub images_without_alt: usize,
    pub page_load_hints: PageLoadHints,
}

impl SeoProfile {
    pub fn total_images(&self) -> usize {
        self.images_with_alt + self.images_without_alt
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResult {
    /// URL as requested, after normalization
    pub url: String,
    /// URL after redirects
    pub final_url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<HeadingRecord>,
    pub links: Vec<LinkRecord>,
    pub images: Vec<ImageRecord>,
    pub tables: Vec<TableRecord>,
    /// Visible page text, truncated with `...` past the configured limit
    pub text_content: String,
    /// Counted on the untruncated text
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub reading_time_minutes: usize,
    pub content_elements: Vec<ContentElement>,
    pub content_blocks: Vec<ContentBlock>,
    pub structured_data: StructuredData,
    pub content: ContentStructure,
    pub seo: SeoProfile,
    /// In [0, 100]
    pub seo_score: u8,
    pub scraped_at: DateTime<Utc>,
    pub response_status: u16,
    /// Selected response headers, keyed by lower-case name
    pub response_headers: BTreeMap<String, String>,
    pub page_size_bytes: usize,
    pub load_time_seconds: f64,
    pub diagnostics: Diagnostics,
}

impl ScrapeResult {
    pub fn header(&self, name: &str) -> &str {
        self.response_headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_redirected(&self) -> bool {
        self.url != self.final_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableRecord {
        TableRecord {
            table_id: 1,
            headers: vec!["Name".to_string(), "Price".to_string()],
            rows: vec![
                vec!["Widget".to_string(), "3".to_string()],
                vec!["Gadget".to_string(), "7".to_string()],
            ],
            has_headers: true,
            caption: String::new(),
        }
    }

    #[test]
    fn test_table_row_record() {
        let table = table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(
            table.row_record(1),
            Some(vec![("Name", "Gadget"), ("Price", "7")])
        );
        assert_eq!(table.row_record(2), None);
    }

    #[test]
    fn test_heading_structure_count_bounds() {
        let structure = HeadingStructure {
            counts: [1, 2, 0, 0, 0, 3],
        };
        assert_eq!(structure.count(1), 1);
        assert_eq!(structure.count(6), 3);
        assert_eq!(structure.count(0), 0);
        assert_eq!(structure.count(7), 0);
        assert_eq!(structure.total(), 6);
    }

    #[test]
    fn test_list_record_statistics() {
        let list = ListRecord {
            kind: ListKind::Definition,
            items: vec![
                ListItem::Definition {
                    term: "ab".to_string(),
                    description: "cd".to_string(),
                },
                ListItem::Text("x".repeat(101)),
            ],
        };
        assert!((list.average_item_length() - 52.5).abs() < f64::EPSILON);
        assert!(list.has_long_items());
    }

    #[test]
    fn test_content_type_names() {
        assert_eq!(ContentType::MainContent.as_str(), "main_content");
        assert_eq!(ContentType::ShortText.as_str(), "short_text");
        assert_eq!(HeadingType::MainTitle.as_str(), "main_title");
        assert_eq!(BlockType::GeneralContent.as_str(), "general_content");
    }
}
