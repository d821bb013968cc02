//! HTML tables as header-aligned row records.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::config::{MAX_TABLE_CELL_CHARS, TRUNCATION_MARKER};
use crate::error_handling::{Diagnostics, ExtractionSection};
use crate::models::TableRecord;
use crate::parse::document::{element_text, ParsedDocument};
use crate::utils::{collapse_whitespace, parse_selector_unsafe, truncate_within};

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("table", "TABLE_SELECTOR"));
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector_unsafe("tr", "ROW_SELECTOR"));
static CAPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("caption", "CAPTION_SELECTOR"));

struct RawRow {
    /// Every `td`/`th` cell, in document order.
    cells: Vec<String>,
    /// Only the `th` cells.
    header_cells: Vec<String>,
}

impl RawRow {
    fn is_header_row(&self) -> bool {
        !self.cells.is_empty() && self.header_cells.len() == self.cells.len()
    }
}

/// Cell text, at most `MAX_TABLE_CELL_CHARS` long with the marker included.
fn cell_text(cell: ElementRef<'_>) -> String {
    truncate_within(
        &collapse_whitespace(&element_text(cell)),
        MAX_TABLE_CELL_CHARS,
        TRUNCATION_MARKER,
    )
}

/// Whether `row` belongs to `table` itself rather than a table nested in it.
fn owned_by(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
        .is_some_and(|owner| std::ptr::eq(owner.value(), table.value()))
}

/// Cells of a row: its `td`/`th` element children.
fn raw_row(row: ElementRef<'_>) -> RawRow {
    let mut cells = Vec::new();
    let mut header_cells = Vec::new();
    for cell in row.children().filter_map(ElementRef::wrap) {
        match cell.value().name() {
            "th" => {
                let text = cell_text(cell);
                header_cells.push(text.clone());
                cells.push(text);
            }
            "td" => cells.push(cell_text(cell)),
            _ => {}
        }
    }
    RawRow { cells, header_cells }
}

/// Aligns `row` to exactly `width` cells.
fn fit_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Builds one table record, `None` when the table holds no rows at all.
///
/// Header names come from the first row's `th` cells. A first row made only
/// of `th` cells is consumed as the header row; a mixed first row (row
/// headers such as `<th>Name</th><td>Alice</td>`) stays as data.
pub fn table_record(table: ElementRef<'_>, table_id: usize) -> Option<TableRecord> {
    let mut rows = table
        .select(&ROW_SELECTOR)
        .filter(|row| owned_by(*row, table))
        .map(raw_row)
        .peekable();

    let first_is_header_row = rows.peek().is_some_and(RawRow::is_header_row);
    let header_cells = if first_is_header_row {
        rows.next().map(|row| row.header_cells)
    } else {
        rows.peek()
            .filter(|row| !row.header_cells.is_empty())
            .map(|row| row.header_cells.clone())
    };

    let data_rows: Vec<Vec<String>> = rows
        .map(|row| row.cells)
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    let width = match (data_rows.first(), &header_cells) {
        (Some(first), _) => first.len(),
        (None, Some(headers)) => headers.len(),
        (None, None) => return None,
    };
    if width == 0 {
        return None;
    }

    let (headers, has_headers) = match header_cells {
        Some(headers) if headers.len() == width => (headers, true),
        _ => ((1..=width).map(|i| format!("Column_{i}")).collect(), false),
    };

    let caption = table
        .select(&CAPTION_SELECTOR)
        .next()
        .map(|c| collapse_whitespace(&element_text(c)))
        .unwrap_or_default();

    Some(TableRecord {
        table_id,
        headers,
        rows: data_rows.into_iter().map(|row| fit_row(row, width)).collect(),
        has_headers,
        caption,
    })
}

/// The first `max_tables` tables of the page.
///
/// `table_id` is the 1-based position among those tables; tables without
/// rows are dropped and leave a gap in the ids.
pub fn extract_tables(document: &ParsedDocument, max_tables: usize, diagnostics: &mut Diagnostics) -> Vec<TableRecord> {
    let mut tables = Vec::new();
    for (index, table) in document.select(&TABLE_SELECTOR).take(max_tables).enumerate() {
        match table_record(table, index + 1) {
            Some(record) => tables.push(record),
            None => diagnostics.warn(
                ExtractionSection::Tables,
                format!("table {} has no rows and was skipped", index + 1),
            ),
        }
    }
    tables
}
