//! Scrape errors.

use brickpick_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Login failed; check the configured credentials")]
    LoginFailed,

    #[error("Set {0} not found in the sets table")]
    SetNotFound(String),

    /// A bounded wait on page state never resolved. The partial page
    /// buffer is discarded: a partial table would silently under-report
    /// parts.
    #[error("Timed out after {seconds}s waiting for {what}; partial results discarded")]
    PageTimeout { what: String, seconds: u64 },

    /// A complete data row carried a quantity that could not be read.
    /// Dropping the row would under-report the bill of materials, so the
    /// extraction fails instead.
    #[error("Unreadable quantity '{value}' in row for part {part_id}")]
    InvalidQuantity { part_id: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_not_found_display() {
        let err = ScrapeError::SetNotFound("10294-1".to_string());
        assert!(err.to_string().contains("10294-1"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_page_timeout_display() {
        let err = ScrapeError::PageTimeout {
            what: "results summary to change".to_string(),
            seconds: 10,
        };
        let text = err.to_string();
        assert!(text.contains("10s"));
        assert!(text.contains("results summary to change"));
        assert!(text.contains("discarded"));
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = ScrapeError::InvalidQuantity {
            part_id: "300121".to_string(),
            value: "many".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("300121"));
        assert!(text.contains("'many'"));
    }

    #[test]
    fn test_browser_error_conversion() {
        let err: ScrapeError = BrowserError::SessionClosed.into();
        assert!(matches!(err, ScrapeError::Browser(_)));
    }
}
