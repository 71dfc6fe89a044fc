//! Color reference table.
//!
//! The inventory service identifies colors by an internal code; the
//! reference CSV maps codes to display names. Loaded once per run and
//! immutable after that. An unmapped code is not an error: consumers fall
//! back to showing the raw code.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Deserialize)]
struct ColorRow {
    color: String,
    name: String,
}

/// Immutable color code → display name lookup.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    names: HashMap<String, String>,
}

impl ColorMap {
    /// Load the mapping from a `color,name` CSV file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::FileNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        let map = Self::from_reader(file)?;
        debug!("Loaded {} color mappings from {}", map.len(), path.display());
        Ok(map)
    }

    /// Load the mapping from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        let mut names = HashMap::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize() {
            let row: ColorRow = row?;
            names.insert(row.color, row.name);
        }
        Ok(Self { names })
    }

    /// Display name for a color code, if mapped.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Display name for a color code, falling back to the raw code.
    pub fn name_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.name_for(code).unwrap_or(code)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
