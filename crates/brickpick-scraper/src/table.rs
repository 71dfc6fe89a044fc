//! Live [`PartsTable`] implementation over a page session.
//!
//! The parts view is a DataTables-rendered table; its observable
//! affordances are the results-summary element, the length selector, the
//! next-page control (disabled via a CSS class on the last page) and the
//! table body itself.

use async_trait::async_trait;
use brickpick_browser::PageSession;

use crate::error::ScrapeError;
use crate::paginate::PartsTable;

const SUMMARY: &str = "#parts_list_table_info";
const LENGTH_SELECT: &str = "select[name=\"parts_list_table_length\"]";
const NEXT_BUTTON: &str = "#parts_list_table_next";
const TABLE_BODY: &str = "#parts_list_table tbody";

pub(crate) struct LivePartsTable<'a> {
    session: &'a PageSession,
}

impl<'a> LivePartsTable<'a> {
    pub(crate) fn new(session: &'a PageSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl PartsTable for LivePartsTable<'_> {
    async fn summary_text(&self) -> Result<Option<String>, ScrapeError> {
        Ok(self.session.inner_text(SUMMARY).await?)
    }

    async fn set_page_size(&self, size: u64) -> Result<(), ScrapeError> {
        self.session
            .select_value(LENGTH_SELECT, &size.to_string())
            .await?;
        Ok(())
    }

    async fn next_enabled(&self) -> Result<bool, ScrapeError> {
        match self.session.attribute(NEXT_BUTTON, "class").await? {
            None => Ok(false),
            Some(classes) => Ok(!classes.split_whitespace().any(|c| c == "disabled")),
        }
    }

    async fn click_next(&self) -> Result<(), ScrapeError> {
        self.session.click_selector(NEXT_BUTTON).await?;
        Ok(())
    }

    async fn page_markup(&self) -> Result<String, ScrapeError> {
        self.session
            .outer_html(TABLE_BODY)
            .await?
            .ok_or_else(|| {
                brickpick_browser::BrowserError::ElementNotFound(TABLE_BODY.to_string()).into()
            })
    }
}
