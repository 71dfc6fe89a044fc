//! Row extraction from captured table markup.
//!
//! A pure transform over one page's `<tbody>` markup: no browser calls, no
//! side effects, same input ⇒ same output. The parts table's cell layout is
//! positional and fixed; anything with fewer cells (header echoes, spacer
//! rows, the "no data" placeholder) is not a data row and is skipped
//! without comment. That leniency stops at short rows: a full-width row
//! whose quantity cannot be read fails the extraction rather than being
//! dropped, which would under-report the bill of materials.

use brickpick_core::PartRecord;

use crate::error::ScrapeError;

/// Cell positions in a parts-table row.
const CELL_PART_ID: usize = 1;
const CELL_PART_NAME: usize = 2;
const CELL_DESIGN_ID: usize = 3;
const CELL_COLOR: usize = 4;
const CELL_TYPE: usize = 5;
const CELL_QUANTITY: usize = 6;

/// A data row carries an image cell plus six value cells.
const MIN_CELLS: usize = 7;

/// Extract every data row from one page of table markup, in order.
pub fn extract_rows(markup: &str) -> Result<Vec<PartRecord>, ScrapeError> {
    let mut records = Vec::new();

    for row in tag_blocks(markup, "tr") {
        let cells: Vec<String> = tag_blocks(row, "td").into_iter().map(cell_text).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }

        let quantity = parse_quantity(&cells[CELL_QUANTITY]).ok_or_else(|| {
            ScrapeError::InvalidQuantity {
                part_id: cells[CELL_PART_ID].clone(),
                value: cells[CELL_QUANTITY].clone(),
            }
        })?;

        records.push(PartRecord {
            part_id: cells[CELL_PART_ID].clone(),
            part_name: cells[CELL_PART_NAME].clone(),
            design_id: cells[CELL_DESIGN_ID].clone(),
            color_code: cells[CELL_COLOR].clone(),
            part_type: cells[CELL_TYPE].clone(),
            quantity,
        });
    }

    Ok(records)
}

/// Parse a quantity cell, tolerating thousands separators ("1,234").
fn parse_quantity(cell: &str) -> Option<u32> {
    let digits: String = cell.chars().filter(|c| !matches!(c, ',' | ' ')).collect();
    digits.parse().ok()
}

/// Inner content of each `<tag ...>...</tag>` block, in document order.
/// Case-insensitive on tag names; nested occurrences of the same tag are
/// not expected inside a table row and are not handled.
fn tag_blocks<'a>(markup: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = markup.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}");

    let mut blocks = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = lower[pos..].find(&open) {
        let start = pos + rel;
        // Guard against prefix matches like "<tr" inside "<track".
        let after_name = start + open.len();
        match lower.as_bytes().get(after_name) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                pos = after_name;
                continue;
            }
        }

        let Some(open_end_rel) = lower[start..].find('>') else {
            break;
        };
        let content_start = start + open_end_rel + 1;
        let Some(close_rel) = lower[content_start..].find(&close) else {
            break;
        };
        blocks.push(&markup[content_start..content_start + close_rel]);
        pos = content_start + close_rel + close.len();
    }

    blocks
}

/// Visible text of a cell: tags stripped, entities decoded, whitespace
/// collapsed.
fn cell_text(block: &str) -> String {
    let mut text = String::with_capacity(block.len());
    let mut in_tag = false;
    for ch in block.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&text))
}

/// Decode the handful of entities the service's tables actually emit.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
