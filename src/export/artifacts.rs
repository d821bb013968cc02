//! Reshapes a `ScrapeResult` into named CSV artifacts.
//!
//! Each artifact is built on its own; a failure is logged and only that
//! artifact is left out. Artifacts without rows are omitted, except
//! `main_summary` and `performance_metrics`.

use crate::error_handling::ExportError;
use crate::models::{ListKind, ScrapeResult, TableRecord};

use super::types::Artifacts;
use super::writer::{decimal, flag, ArtifactWriter};

type ArtifactResult = Result<Option<String>, ExportError>;

const HEADING_COUNT_COLUMNS: [&str; 6] = [
    "H1_Count", "H2_Count", "H3_Count", "H4_Count", "H5_Count", "H6_Count",
];

const SEO_META_NAMES: &[&str] = &["description", "keywords", "robots", "author", "viewport"];
const SOCIAL_META_PREFIXES: &[&str] = &["og:", "twitter:", "fb:"];
const GENERIC_MAILBOXES: &[&str] = &["info@", "contact@", "support@", "admin@"];
const TEXT_INPUT_TYPES: &[&str] = &["text", "email", "tel", "url"];

fn len(text: &str) -> String {
    text.chars().count().to_string()
}

fn heading_counts(result: &ScrapeResult) -> impl Iterator<Item = String> + '_ {
    (1..=6).map(|level| result.seo.heading_structure.count(level).to_string())
}

fn scraped_at(result: &ScrapeResult) -> String {
    result.scraped_at.to_rfc3339()
}

fn main_summary(result: &ScrapeResult) -> ArtifactResult {
    let mut out = ArtifactWriter::new(
        [
            "URL",
            "Final_URL",
            "Title",
            "Title_Length",
            "Description",
            "Description_Length",
            "Word_Count",
            "Sentence_Count",
            "Paragraph_Count",
            "Character_Count",
            "Reading_Time_Minutes",
            "Page_Size_Bytes",
            "Load_Time_Seconds",
            "Response_Status",
            "Total_Headings",
            "Total_Links",
            "Total_Images",
            "Total_Tables",
            "Internal_Links",
            "External_Links",
            "Images_With_Alt",
            "Images_Without_Alt",
            "Scraped_At",
        ]
        .into_iter()
        .chain(HEADING_COUNT_COLUMNS),
    )?;
    let seo = &result.seo;
    let mut row = vec![
        result.url.clone(),
        result.final_url.clone(),
        result.title.clone(),
        len(&result.title),
        result.description.clone(),
        len(&result.description),
        result.word_count.to_string(),
        result.sentence_count.to_string(),
        result.paragraph_count.to_string(),
        result.character_count.to_string(),
        result.reading_time_minutes.to_string(),
        result.page_size_bytes.to_string(),
        decimal(result.load_time_seconds),
        result.response_status.to_string(),
        result.headings.len().to_string(),
        result.links.len().to_string(),
        result.images.len().to_string(),
        result.tables.len().to_string(),
        seo.internal_links.to_string(),
        seo.external_links.to_string(),
        seo.images_with_alt.to_string(),
        seo.images_without_alt.to_string(),
        scraped_at(result),
    ];
    row.extend(heading_counts(result));
    out.row(row)?;
    out.finish().map(Some)
}

fn headings(result: &ScrapeResult) -> ArtifactResult {
    if result.headings.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Level",
        "Text",
        "Text_Length",
        "Word_Count",
        "ID",
        "Class",
        "Position",
        "Hierarchy_Position",
        "Heading_Type",
        "Has_ID",
        "Has_Class",
        "Is_Question",
        "Is_SEO_Friendly",
        "Accessibility_Score",
    ])?;
    for heading in &result.headings {
        out.row([
            result.url.clone(),
            heading.level.clone(),
            heading.text.clone(),
            heading.text_length.to_string(),
            heading.word_count.to_string(),
            heading.element_id.clone(),
            heading.element_class.clone(),
            heading.position_in_level.to_string(),
            heading.hierarchy_position.clone(),
            heading.heading_type.as_str().to_string(),
            flag(heading.has_id),
            flag(heading.has_class),
            flag(heading.is_question),
            flag(heading.is_seo_friendly),
            heading.accessibility_score.to_string(),
        ])?;
    }
    out.finish().map(Some)
}

fn links(result: &ScrapeResult) -> ArtifactResult {
    if result.links.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Link_Text",
        "Link_URL",
        "Resolved_URL",
        "Title",
        "Target",
        "Rel",
        "Class",
        "Is_External",
        "Position",
        "Text_Length",
        "Has_Title",
        "Opens_New_Tab",
    ])?;
    for link in &result.links {
        out.row([
            result.url.clone(),
            link.text.clone(),
            link.href.clone(),
            link.resolved_url.clone().unwrap_or_default(),
            link.title.clone(),
            link.target.clone(),
            link.rel.clone(),
            link.class.clone(),
            flag(link.is_external()),
            link.position.to_string(),
            len(&link.text),
            flag(!link.title.is_empty()),
            flag(link.opens_new_tab()),
        ])?;
    }
    out.finish().map(Some)
}

fn images(result: &ScrapeResult) -> ArtifactResult {
    if result.images.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Alt_Text",
        "Image_Src",
        "Resolved_Src",
        "Title",
        "Width",
        "Height",
        "Loading",
        "Class",
        "Position",
        "Has_Alt",
        "Alt_Length",
        "Has_Dimensions",
        "Is_Lazy_Loaded",
    ])?;
    for image in &result.images {
        out.row([
            result.url.clone(),
            image.alt.clone(),
            image.src.clone(),
            image.resolved_src.clone().unwrap_or_default(),
            image.title.clone(),
            image.width.clone(),
            image.height.clone(),
            image.loading.clone(),
            image.class.clone(),
            image.position.to_string(),
            flag(image.has_alt),
            len(&image.alt),
            flag(image.has_dimensions()),
            flag(image.is_lazy_loaded()),
        ])?;
    }
    out.finish().map(Some)
}

fn seo_analysis(result: &ScrapeResult) -> ArtifactResult {
    let seo = &result.seo;
    let title_length = seo.title_tag.chars().count();
    let description_length = seo.meta_description.chars().count();
    let mut out = ArtifactWriter::new(
        [
            "URL",
            "Title_Tag",
            "Title_Length",
            "Title_Optimal",
            "Meta_Description",
            "Description_Length",
            "Description_Optimal",
            "Meta_Keywords",
            "Canonical_URL",
            "Has_Canonical",
            "Robots",
            "Language",
            "Internal_Links",
            "External_Links",
            "Images_Without_Alt",
            "SEO_Score",
        ]
        .into_iter()
        .chain(HEADING_COUNT_COLUMNS),
    )?;
    let mut row = vec![
        result.url.clone(),
        seo.title_tag.clone(),
        title_length.to_string(),
        flag((30..=60).contains(&title_length)),
        seo.meta_description.clone(),
        description_length.to_string(),
        flag((120..=160).contains(&description_length)),
        seo.meta_keywords.clone(),
        seo.canonical_url.clone(),
        flag(!seo.canonical_url.is_empty()),
        seo.robots.clone(),
        seo.lang.clone(),
        seo.internal_links.to_string(),
        seo.external_links.to_string(),
        seo.images_without_alt.to_string(),
        result.seo_score.to_string(),
    ];
    row.extend(heading_counts(result));
    out.row(row)?;
    out.finish().map(Some)
}

fn meta_tags(result: &ScrapeResult) -> ArtifactResult {
    let tags = &result.structured_data.meta_tags;
    if tags.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Name",
        "Content",
        "Content_Length",
        "Is_SEO_Related",
        "Is_Social_Media",
    ])?;
    for tag in tags {
        let name = tag.name.to_lowercase();
        out.row([
            result.url.clone(),
            tag.name.clone(),
            tag.content.clone(),
            len(&tag.content),
            flag(SEO_META_NAMES.contains(&name.as_str())),
            flag(SOCIAL_META_PREFIXES.iter().any(|p| name.starts_with(p))),
        ])?;
    }
    out.finish().map(Some)
}

fn social_media(result: &ScrapeResult) -> ArtifactResult {
    let social = &result.structured_data.social_media;
    if social.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Platform",
        "Property",
        "Content",
        "Content_Length",
        "Is_Image",
        "Is_Title",
        "Is_Description",
    ])?;
    for (key, content) in social {
        let platform = if key.starts_with("og:") { "Open_Graph" } else { "Twitter" };
        let property = key.split_once(':').map_or(key.as_str(), |(_, p)| p);
        out.row([
            result.url.clone(),
            platform.to_string(),
            property.to_string(),
            content.clone(),
            len(content),
            flag(property == "image"),
            flag(property == "title"),
            flag(property == "description"),
        ])?;
    }
    out.finish().map(Some)
}

fn contact_info(result: &ScrapeResult) -> ArtifactResult {
    let contact = &result.structured_data.contact_info;
    if contact.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new(["URL", "Type", "Value", "Domain", "Is_Generic"])?;
    for email in &contact.emails {
        let lowered = email.to_lowercase();
        out.row([
            result.url.clone(),
            "Email".to_string(),
            email.clone(),
            email.split_once('@').map(|(_, domain)| domain).unwrap_or_default().to_string(),
            flag(GENERIC_MAILBOXES.iter().any(|g| lowered.contains(g))),
        ])?;
    }
    for phone in &contact.phones {
        out.row([
            result.url.clone(),
            "Phone".to_string(),
            phone.clone(),
            String::new(),
            flag(false),
        ])?;
    }
    out.finish().map(Some)
}

fn forms_summary(result: &ScrapeResult) -> ArtifactResult {
    let forms = &result.structured_data.forms;
    if forms.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Form_ID",
        "Action",
        "Method",
        "Input_Count",
        "Has_Action",
        "Is_Search_Form",
        "Is_Contact_Form",
        "Required_Fields",
        "Text_Inputs",
        "Has_Submit",
    ])?;
    for (index, form) in forms.iter().enumerate() {
        let inputs = &form.inputs;
        let is_contact = inputs
            .iter()
            .any(|i| i.input_type == "email" || i.name.to_lowercase().contains("email"));
        out.row([
            result.url.clone(),
            (index + 1).to_string(),
            form.action.clone(),
            form.method.clone(),
            inputs.len().to_string(),
            flag(!form.action.is_empty()),
            flag(form.action.to_lowercase().contains("search")),
            flag(is_contact),
            inputs.iter().filter(|i| i.required).count().to_string(),
            inputs
                .iter()
                .filter(|i| TEXT_INPUT_TYPES.contains(&i.input_type.as_str()))
                .count()
                .to_string(),
            flag(inputs.iter().any(|i| i.input_type == "submit")),
        ])?;
    }
    out.finish().map(Some)
}

fn lists_summary(result: &ScrapeResult) -> ArtifactResult {
    let lists = &result.content.lists;
    if lists.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "List_ID",
        "Type",
        "Item_Count",
        "Is_Ordered",
        "Is_Definition",
        "Average_Item_Length",
        "Has_Long_Items",
    ])?;
    for (index, list) in lists.iter().enumerate() {
        out.row([
            result.url.clone(),
            (index + 1).to_string(),
            list.kind.tag().to_string(),
            list.items.len().to_string(),
            flag(list.kind == ListKind::Ordered),
            flag(list.kind == ListKind::Definition),
            decimal(list.average_item_length()),
            flag(list.has_long_items()),
        ])?;
    }
    out.finish().map(Some)
}

/// The table's own columns and rows, nothing added.
pub(crate) fn table_artifact(table: &TableRecord) -> Result<String, ExportError> {
    let mut out = ArtifactWriter::new(&table.headers)?;
    for row in &table.rows {
        out.row(row)?;
    }
    out.finish()
}

fn full_text_content(result: &ScrapeResult) -> ArtifactResult {
    if result.text_content.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Full_Text_Content",
        "Word_Count",
        "Character_Count",
        "Sentence_Count",
        "Paragraph_Count",
        "Reading_Time_Minutes",
        "Average_Words_Per_Sentence",
        "Average_Sentence_Per_Paragraph",
    ])?;
    out.row([
        result.url.clone(),
        result.text_content.clone(),
        result.word_count.to_string(),
        result.character_count.to_string(),
        result.sentence_count.to_string(),
        result.paragraph_count.to_string(),
        result.reading_time_minutes.to_string(),
        decimal(result.word_count as f64 / result.sentence_count.max(1) as f64),
        decimal(result.sentence_count as f64 / result.paragraph_count.max(1) as f64),
    ])?;
    out.finish().map(Some)
}

fn performance_metrics(result: &ScrapeResult) -> ArtifactResult {
    let mut out = ArtifactWriter::new([
        "URL",
        "Final_URL",
        "Response_Status",
        "Page_Size_Bytes",
        "Page_Size_KB",
        "Load_Time_Seconds",
        "Content_Type",
        "Server",
        "Is_Redirected",
        "Has_Cache_Headers",
        "Scraped_At",
    ])?;
    let has_cache_headers =
        !result.header("cache-control").is_empty() || !result.header("expires").is_empty();
    out.row([
        result.url.clone(),
        result.final_url.clone(),
        result.response_status.to_string(),
        result.page_size_bytes.to_string(),
        decimal(result.page_size_bytes as f64 / 1024.0),
        decimal(result.load_time_seconds),
        result.header("content-type").to_string(),
        result.header("server").to_string(),
        flag(result.is_redirected()),
        flag(has_cache_headers),
        scraped_at(result),
    ])?;
    out.finish().map(Some)
}

fn content_elements(result: &ScrapeResult) -> ArtifactResult {
    if result.content_elements.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Tag",
        "Text",
        "Position",
        "Word_Count",
        "Char_Count",
        "Sentence_Count",
        "Element_ID",
        "Element_Class",
        "Parent_Tag",
        "Importance_Score",
        "Content_Type",
        "Has_Links",
        "Has_Images",
        "Has_Formatting",
        "Is_Heading",
        "Is_Navigation",
        "Is_Main_Content",
    ])?;
    for element in &result.content_elements {
        out.row([
            result.url.clone(),
            element.tag.clone(),
            element.text.clone(),
            element.position.to_string(),
            element.word_count.to_string(),
            element.char_count.to_string(),
            element.sentence_count.to_string(),
            element.element_id.clone(),
            element.element_class.clone(),
            element.parent_tag.clone(),
            element.importance_score.to_string(),
            element.content_type.as_str().to_string(),
            flag(element.has_links),
            flag(element.has_images),
            flag(element.has_formatting),
            flag(element.is_heading),
            flag(element.is_navigation),
            flag(element.is_main_content),
        ])?;
    }
    out.finish().map(Some)
}

fn content_blocks(result: &ScrapeResult) -> ArtifactResult {
    if result.content_blocks.is_empty() {
        return Ok(None);
    }
    let mut out = ArtifactWriter::new([
        "URL",
        "Block_ID",
        "Tag",
        "Block_Type",
        "Text_Preview",
        "Word_Count",
        "Char_Count",
        "Sentence_Count",
        "Element_ID",
        "Element_Class",
        "Importance_Score",
        "Child_Elements",
        "Heading_Count",
        "Paragraph_Count",
        "Link_Count",
        "Image_Count",
        "List_Count",
        "Has_Structured_Content",
        "Is_Interactive",
        "Reading_Time_Minutes",
        "Avg_Word_Length",
        "Avg_Sentence_Length",
        "Readability_Score",
    ])?;
    for block in &result.content_blocks {
        out.row([
            result.url.clone(),
            block.block_id.to_string(),
            block.tag.clone(),
            block.block_type.as_str().to_string(),
            block.text_preview.clone(),
            block.word_count.to_string(),
            block.char_count.to_string(),
            block.sentence_count.to_string(),
            block.element_id.clone(),
            block.element_class.clone(),
            block.importance_score.to_string(),
            block.child_elements.to_string(),
            block.heading_count.to_string(),
            block.paragraph_count.to_string(),
            block.link_count.to_string(),
            block.image_count.to_string(),
            block.list_count.to_string(),
            flag(block.has_structured_content),
            flag(block.is_interactive),
            block.reading_time_minutes.to_string(),
            decimal(block.avg_word_length),
            decimal(block.avg_sentence_length),
            block.readability_score.to_string(),
        ])?;
    }
    out.finish().map(Some)
}

type Builder = fn(&ScrapeResult) -> ArtifactResult;

const BUILDERS: &[(&str, Builder)] = &[
    ("main_summary", main_summary),
    ("headings", headings),
    ("links", links),
    ("images", images),
    ("seo_analysis", seo_analysis),
    ("meta_tags", meta_tags),
    ("social_media", social_media),
    ("contact_info", contact_info),
    ("forms_summary", forms_summary),
    ("lists_summary", lists_summary),
    ("full_text_content", full_text_content),
    ("performance_metrics", performance_metrics),
    ("content_elements", content_elements),
    ("content_blocks", content_blocks),
];

/// Builds every artifact that has data.
///
/// Tables become `table_<table_id>`.
pub fn build_artifacts(result: &ScrapeResult) -> Artifacts {
    let mut artifacts = Artifacts::new();
    for (name, build) in BUILDERS {
        match build(result) {
            Ok(Some(csv)) => {
                artifacts.insert((*name).to_string(), csv);
            }
            Ok(None) => log::debug!("artifact {name} omitted: no rows"),
            Err(e) => log::warn!("artifact {name} skipped: {e}"),
        }
    }
    for table in &result.tables {
        let name = format!("table_{}", table.table_id);
        match table_artifact(table) {
            Ok(csv) => {
                artifacts.insert(name, csv);
            }
            Err(e) => log::warn!("artifact {name} skipped: {e}"),
        }
    }
    artifacts
}
