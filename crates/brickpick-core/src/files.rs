//! Part-list and pick-list CSV files.
//!
//! Per-set outputs live under `<data_dir>/<set>/`: the scraped bill of
//! materials as `<set>_part_list.csv` and the reconciled pick list as
//! `<set>_pick_list.csv`. Column orders are fixed by the serde renames on
//! the record types.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CoreError;
use crate::model::{PartRecord, PickListEntry};

/// Path of a set's part-list CSV.
pub fn part_list_path(data_dir: &Path, set_number: &str) -> PathBuf {
    data_dir
        .join(set_number)
        .join(format!("{set_number}_part_list.csv"))
}

/// Path of a set's pick-list CSV.
pub fn pick_list_path(data_dir: &Path, set_number: &str) -> PathBuf {
    data_dir
        .join(set_number)
        .join(format!("{set_number}_pick_list.csv"))
}

/// Write a scraped part list, creating the set directory if needed.
pub fn write_part_list(path: &Path, parts: &[PartRecord]) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for part in parts {
        writer.serialize(part)?;
    }
    writer.flush()?;
    debug!("Wrote {} parts to {}", parts.len(), path.display());
    Ok(())
}

/// Read a previously written part list.
pub fn read_part_list(path: &Path) -> Result<Vec<PartRecord>, CoreError> {
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut parts = Vec::new();
    for row in reader.deserialize() {
        parts.push(row?);
    }
    Ok(parts)
}

/// Write the reconciled pick list, creating the set directory if needed.
pub fn write_pick_list(path: &Path, entries: &[PickListEntry]) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    debug!("Wrote {} pick-list rows to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_parts() -> Vec<PartRecord> {
        vec![
            PartRecord {
                part_id: "300121".to_string(),
                part_name: "Brick 2x4".to_string(),
                design_id: "3001".to_string(),
                color_code: "21".to_string(),
                part_type: "Part".to_string(),
                quantity: 4,
            },
            PartRecord {
                part_id: "302023".to_string(),
                part_name: "Plate 2x2".to_string(),
                design_id: "3020".to_string(),
                color_code: "23".to_string(),
                part_type: "Part".to_string(),
                quantity: 2,
            },
        ]
    }

    #[test]
    fn test_paths_follow_set_layout() {
        let data = Path::new("data");
        assert_eq!(
            part_list_path(data, "10294-1"),
            Path::new("data/10294-1/10294-1_part_list.csv")
        );
        assert_eq!(
            pick_list_path(data, "10294-1"),
            Path::new("data/10294-1/10294-1_pick_list.csv")
        );
    }

    #[test]
    fn test_part_list_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = part_list_path(dir.path(), "10294-1");
        let parts = sample_parts();

        write_part_list(&path, &parts).unwrap();
        let read_back = read_part_list(&path).unwrap();
        assert_eq!(read_back, parts);
    }

    #[test]
    fn test_read_missing_part_list() {
        let result = read_part_list(Path::new("/nonexistent/part_list.csv"));
        assert!(matches!(result, Err(CoreError::FileNotFound(_))));
    }

    #[test]
    fn test_pick_list_column_order() {
        let dir = TempDir::new().unwrap();
        let path = pick_list_path(dir.path(), "10294-1");
        let entries = vec![PickListEntry {
            location: "A1".to_string(),
            design_id: "3001".to_string(),
            description: "Brick 2x4".to_string(),
            color_name: "Bright Red".to_string(),
            quantity_needed: 4,
        }];

        write_pick_list(&path, &entries).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Location,Design ID,Description,Color,Quantity Needed"
        );
        assert_eq!(lines.next().unwrap(), "A1,3001,Brick 2x4,Bright Red,4");
    }
}
