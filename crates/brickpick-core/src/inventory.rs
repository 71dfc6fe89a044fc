//! Inventory export parser.
//!
//! The user's own storage contents arrive as an XML export of repeated
//! `ITEM` elements carrying `ITEMID`, `COLOR`, `QTY` and `REMARKS`. The
//! remarks field holds the free-text storage location, possibly wrapped in
//! the service's `[IB]` decoration markers.
//!
//! Filtering happens against the raw remarks text, before marker cleanup;
//! ignore markers like `(Built)` sit outside the decoration brackets.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::InventoryItem;

/// Decoration marker wrapped around service-managed locations.
const LOCATION_MARKER: &str = "[IB]";

/// Parse an inventory export file.
///
/// `ignore` is the configured list of location substrings to exclude; an
/// empty slice means no filtering.
pub fn parse_inventory_file(path: &Path, ignore: &[String]) -> Result<Vec<InventoryItem>, CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.display().to_string()));
    }
    let xml = std::fs::read_to_string(path)?;
    let items = parse_inventory(&xml, ignore)?;
    debug!("Parsed {} inventory items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse an inventory export document.
pub fn parse_inventory(xml: &str, ignore: &[String]) -> Result<Vec<InventoryItem>, CoreError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<PartialItem> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag == "ITEM" {
                    current = Some(PartialItem::default());
                } else if current.is_some() {
                    current_element = tag;
                }
            }
            Event::Text(e) => {
                if let Some(ref mut item) = current {
                    let text = e.unescape().unwrap_or_default().to_string();
                    match current_element.as_str() {
                        "ITEMID" => item.design_id = Some(text),
                        "COLOR" => item.color_code = Some(text),
                        "QTY" => item.quantity = Some(text),
                        "REMARKS" => item.location = Some(text),
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"ITEM" {
                    if let Some(partial) = current.take() {
                        if let Some(item) = partial.build(ignore) {
                            items.push(item);
                        }
                    }
                }
                current_element.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

/// Accumulates child-element text while inside one `ITEM`.
#[derive(Debug, Default)]
struct PartialItem {
    design_id: Option<String>,
    color_code: Option<String>,
    quantity: Option<String>,
    location: Option<String>,
}

impl PartialItem {
    /// Finish the item: apply the ignore filter and location cleanup.
    /// Returns `None` for filtered rows and for rows missing their
    /// identifying fields (degraded, never fatal).
    fn build(self, ignore: &[String]) -> Option<InventoryItem> {
        let (Some(design_id), Some(color_code)) = (self.design_id, self.color_code) else {
            warn!("Skipping inventory item without ITEMID/COLOR");
            return None;
        };

        // Missing remarks parse as an empty location and stay in the set.
        let raw_location = self.location.unwrap_or_default();
        if ignore.iter().any(|s| raw_location.contains(s.as_str())) {
            return None;
        }

        let quantity = match self.quantity.as_deref().map(str::parse::<u32>) {
            Some(Ok(qty)) => qty,
            _ => {
                warn!("Unreadable quantity for item {design_id}, recording 0");
                0
            }
        };

        Some(InventoryItem {
            design_id,
            color_code,
            quantity,
            location: clean_location(&raw_location),
        })
    }
}

/// Strip exactly one leading and one trailing decoration marker, then trim.
/// Text without both markers passes through unchanged; the length check
/// keeps a bare marker (too short to carry both) from slicing past itself.
fn clean_location(raw: &str) -> String {
    if raw.len() >= 2 * LOCATION_MARKER.len()
        && raw.starts_with(LOCATION_MARKER)
        && raw.ends_with(LOCATION_MARKER)
    {
        raw[LOCATION_MARKER.len()..raw.len() - LOCATION_MARKER.len()]
            .trim()
            .to_string()
    } else {
        raw.to_string()
    }
}
