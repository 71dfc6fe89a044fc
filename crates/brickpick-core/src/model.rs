//! Typed records for required parts, owned inventory and pick-list output.
//!
//! Serde renames pin the CSV column names, so the struct field order is the
//! file column order.

use serde::{Deserialize, Serialize};

/// Location placed on a pick-list entry when no inventory row matches.
pub const UNKNOWN_LOCATION: &str = "(location unknown)";

/// One required part from a set's bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    #[serde(rename = "Part ID")]
    pub part_id: String,

    #[serde(rename = "Part Name")]
    pub part_name: String,

    #[serde(rename = "Design ID")]
    pub design_id: String,

    #[serde(rename = "Color")]
    pub color_code: String,

    #[serde(rename = "Type")]
    pub part_type: String,

    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

/// One row of the user's own inventory, after location cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub design_id: String,
    pub color_code: String,
    pub quantity: u32,
    pub location: String,
}

/// One row of the final pick list. Terminal: written out, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickListEntry {
    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Design ID")]
    pub design_id: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Color")]
    pub color_name: String,

    #[serde(rename = "Quantity Needed")]
    pub quantity_needed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_record_csv_headers() {
        let part = PartRecord {
            part_id: "300121".to_string(),
            part_name: "Brick 2x4".to_string(),
            design_id: "3001".to_string(),
            color_code: "21".to_string(),
            part_type: "Part".to_string(),
            quantity: 4,
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&part).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.starts_with("Part ID,Part Name,Design ID,Color,Type,Quantity"));
    }

    #[test]
    fn test_pick_list_entry_csv_headers() {
        let entry = PickListEntry {
            location: "A1".to_string(),
            design_id: "3001".to_string(),
            description: "Brick 2x4".to_string(),
            color_name: "Bright Red".to_string(),
            quantity_needed: 4,
        };

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&entry).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(out.starts_with("Location,Design ID,Description,Color,Quantity Needed"));
    }
}
