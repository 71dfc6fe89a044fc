//! Set lookup in the filterable sets table.

use std::time::Duration;

use brickpick_browser::PageSession;
use tracing::{debug, warn};

use crate::error::ScrapeError;

const FILTER_INPUT: &str = "#sets_list_table_filter input[type=\"search\"]";
const PROCESSING: &str = "#sets_list_table_processing";
const FIRST_ROW: &str = "#sets_list_table tbody tr";

const NO_RECORDS_TEXT: &str = "No matching records found";

/// Outcome of filtering the sets table down to one set number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMatch {
    /// Distinct outcome; the caller decides how hard to fail.
    NotFound,
    Unique,
    /// More than one row matched; the first row in table order is used.
    Ambiguous { rows: u64 },
}

/// Filter the sets table and classify what came back. On an ambiguous
/// match the first row is selected and the ambiguity is logged, not
/// surfaced as an error.
pub(crate) async fn search_for_set(
    session: &PageSession,
    set_number: &str,
    timeout: Duration,
) -> Result<SetMatch, ScrapeError> {
    session.fill(FILTER_INPUT, set_number).await?;
    session.press_key("Enter").await?;

    // The table redraws through a "Processing..." overlay; rows read while
    // it shows belong to the previous filter.
    session.wait_until_hidden(PROCESSING, timeout).await?;
    session.wait_for_selector(FIRST_ROW, timeout).await?;

    let row_count = session
        .evaluate("document.querySelectorAll('#sets_list_table tbody tr').length")
        .await?
        .as_u64()
        .unwrap_or(0);
    let first_row_text = session.inner_text(FIRST_ROW).await?;

    let outcome = classify(row_count, first_row_text.as_deref());
    match outcome {
        SetMatch::NotFound => debug!("No matching records for set {set_number}"),
        SetMatch::Unique => debug!("Set {set_number} matched one row"),
        SetMatch::Ambiguous { rows } => {
            warn!("Filter for {set_number} matched {rows} rows, proceeding with the first");
        }
    }
    Ok(outcome)
}

fn classify(row_count: u64, first_row_text: Option<&str>) -> SetMatch {
    let placeholder = first_row_text
        .map(|text| text.contains(NO_RECORDS_TEXT))
        .unwrap_or(false);

    if row_count == 0 || (row_count == 1 && placeholder) {
        SetMatch::NotFound
    } else if row_count > 1 {
        SetMatch::Ambiguous { rows: row_count }
    } else {
        SetMatch::Unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_is_not_found() {
        assert_eq!(classify(0, None), SetMatch::NotFound);
    }

    #[test]
    fn test_placeholder_row_is_not_found() {
        assert_eq!(
            classify(1, Some("No matching records found")),
            SetMatch::NotFound
        );
    }

    #[test]
    fn test_single_data_row_is_unique() {
        assert_eq!(
            classify(1, Some("10294-1 Titanic 9090 parts")),
            SetMatch::Unique
        );
    }

    #[test]
    fn test_multiple_rows_are_ambiguous() {
        assert_eq!(
            classify(3, Some("10294-1 Titanic 9090 parts")),
            SetMatch::Ambiguous { rows: 3 }
        );
    }
}
