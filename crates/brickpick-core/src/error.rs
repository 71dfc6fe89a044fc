//! Core errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Required file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}
