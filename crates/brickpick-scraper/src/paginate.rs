//! Pagination driver for the client-rendered parts table.
//!
//! The table re-renders asynchronously after every control interaction, so
//! the driver never reads a page until the results summary proves the
//! interaction has taken visible effect:
//!
//! - a page-size change is confirmed by the summary reaching its expected
//!   new range before the first capture;
//! - a next-page click is confirmed by the summary text differing from its
//!   pre-click value (plain before/after equality check).
//!
//! Both confirmations are bounded waits; a wait that never resolves aborts
//! the whole extraction and the accumulated rows are discarded.
//!
//! The walk terminates on exactly one condition: the next-page control is
//! absent or disabled. The declared entry count only decides whether the
//! page size is escalated first.

use std::time::Duration;

use async_trait::async_trait;
use brickpick_core::PartRecord;
use regex::Regex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::extract::extract_rows;

/// Page size the table starts with.
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Page size requested when the table holds more than one default page.
pub const EXPANDED_PAGE_SIZE: u64 = 100;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Observable affordances of a paginated results table.
///
/// The production implementation wraps a live page session; tests drive the
/// protocol against a scripted table.
#[async_trait]
pub trait PartsTable: Sync {
    /// The results-summary text ("Showing A to B of N entries"), if
    /// currently rendered.
    async fn summary_text(&self) -> Result<Option<String>, ScrapeError>;

    /// Request a new page size through the table's length control.
    async fn set_page_size(&self, size: u64) -> Result<(), ScrapeError>;

    /// Whether a next-page control is present and enabled.
    async fn next_enabled(&self) -> Result<bool, ScrapeError>;

    /// Activate the next-page control.
    async fn click_next(&self) -> Result<(), ScrapeError>;

    /// Markup of the currently rendered page body.
    async fn page_markup(&self) -> Result<String, ScrapeError>;
}

/// Driver states. Entry is `Idle`; `Done` is terminal; a wait timeout
/// aborts the run by returning early, discarding captured rows.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DriveState {
    Idle,
    SizeAdjustRequested { expected_summary: String },
    SizeAdjustConfirmed,
    PageCaptured { summary: Option<String> },
    NextRequested { previous_summary: Option<String> },
    Done,
}

/// Walks a [`PartsTable`] through all of its pages, extracting rows as it
/// goes.
pub struct Paginator<'a, T: PartsTable> {
    table: &'a T,
    /// Single bound applied to every wait on table state.
    timeout: Duration,
}

impl<'a, T: PartsTable> Paginator<'a, T> {
    pub fn new(table: &'a T, timeout: Duration) -> Self {
        Self { table, timeout }
    }

    /// Traverse every page and return the concatenated rows.
    pub async fn run(&self) -> Result<Vec<PartRecord>, ScrapeError> {
        let mut parts: Vec<PartRecord> = Vec::new();
        let mut state = DriveState::Idle;

        loop {
            state = match state {
                DriveState::Idle => {
                    let total = self.declared_total().await?;
                    if total > DEFAULT_PAGE_SIZE {
                        self.table.set_page_size(EXPANDED_PAGE_SIZE).await?;
                        let expected_summary = format!(
                            "Showing 1 to {} of {} entries",
                            total.min(EXPANDED_PAGE_SIZE),
                            total
                        );
                        DriveState::SizeAdjustRequested { expected_summary }
                    } else {
                        DriveState::SizeAdjustConfirmed
                    }
                }

                DriveState::SizeAdjustRequested { expected_summary } => {
                    // Reading before the resize lands would re-capture
                    // rows the smaller first page already showed.
                    self.wait_for_summary(&expected_summary).await?;
                    DriveState::SizeAdjustConfirmed
                }

                DriveState::SizeAdjustConfirmed => self.capture_page(&mut parts).await?,

                DriveState::PageCaptured { summary } => {
                    if self.table.next_enabled().await? {
                        self.table.click_next().await?;
                        DriveState::NextRequested {
                            previous_summary: summary,
                        }
                    } else {
                        DriveState::Done
                    }
                }

                DriveState::NextRequested { previous_summary } => {
                    self.wait_for_summary_change(previous_summary.as_deref())
                        .await?;
                    self.capture_page(&mut parts).await?
                }

                DriveState::Done => break,
            };
        }

        debug!("Pagination complete: {} rows", parts.len());
        Ok(parts)
    }

    /// Capture the current page, extract its rows, and report the
    /// post-capture summary for the next continuation check.
    async fn capture_page(
        &self,
        parts: &mut Vec<PartRecord>,
    ) -> Result<DriveState, ScrapeError> {
        let markup = self.table.page_markup().await?;
        let rows = extract_rows(&markup)?;
        debug!("Captured page with {} rows", rows.len());
        parts.extend(rows);

        Ok(DriveState::PageCaptured {
            summary: self.table.summary_text().await?,
        })
    }

    /// Declared entry count from the results summary. Absent or unparsable
    /// text degrades to 0 with a warning; the page walk still runs.
    async fn declared_total(&self) -> Result<u64, ScrapeError> {
        let summary = self.table.summary_text().await?;
        match summary.as_deref().and_then(parse_entry_count) {
            Some(total) => Ok(total),
            None => {
                warn!(
                    "Results summary missing or unparsable ({:?}); assuming 0 entries, \
                     extraction may be incomplete",
                    summary
                );
                Ok(0)
            }
        }
    }

    /// Block until the summary text matches the post-resize expectation.
    async fn wait_for_summary(&self, expected: &str) -> Result<(), ScrapeError> {
        let start = Instant::now();
        loop {
            if self.table.summary_text().await?.as_deref() == Some(expected) {
                return Ok(());
            }
            if start.elapsed() > self.timeout {
                return Err(self.timed_out("results summary to confirm the page size"));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until the summary text differs from its pre-click value.
    async fn wait_for_summary_change(&self, previous: Option<&str>) -> Result<(), ScrapeError> {
        let start = Instant::now();
        loop {
            if self.table.summary_text().await?.as_deref() != previous {
                return Ok(());
            }
            if start.elapsed() > self.timeout {
                return Err(self.timed_out("results summary to change"));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn timed_out(&self, what: &str) -> ScrapeError {
        ScrapeError::PageTimeout {
            what: what.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }
}

/// Parse the entry count out of "Showing A to B of N entries".
fn parse_entry_count(summary: &str) -> Option<u64> {
    let re = Regex::new(r"Showing \d+ to \d+ of (\d+) entries").unwrap();
    re.captures(summary)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
#[path = "paginate_tests.rs"]
mod tests;
