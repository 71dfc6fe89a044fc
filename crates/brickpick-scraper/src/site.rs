//! Logged-in driving of the inventory service.

use std::time::Duration;

use brickpick_browser::{BrowserError, PageSession};
use brickpick_config::Credentials;
use brickpick_core::PartRecord;
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::paginate::Paginator;
use crate::search::{SetMatch, search_for_set};
use crate::table::LivePartsTable;

const LOGIN_EMAIL: &str = "#loginemail";
const LOGIN_PASSWORD: &str = "#loginpassword";
const SIGN_IN_BUTTON: &str = "#sign_in";
const TOP_MENU: &str = "#top-menu";

const SETS_FILTER: &str = "#sets_list_table_filter";
const FIRST_ROW_PARTS_BUTTON: &str =
    "#sets_list_table tbody tr:first-child .table_button_parts_inventory";
const PARTS_TABLE: &str = "#parts_list_table";
const PARTS_PROCESSING: &str = "#parts_list_table_processing";

/// One logged-in pass over the inventory service.
///
/// Borrows the page session; the browser process itself is owned and
/// released by the caller, so cleanup runs whether or not a scrape
/// succeeds.
pub struct ServiceSession<'a> {
    session: &'a PageSession,
    base_url: String,
    /// Single bound applied to every wait on page state.
    timeout: Duration,
}

impl<'a> ServiceSession<'a> {
    pub fn new(session: &'a PageSession, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            session,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Log in with the given credentials. Success is observed as the top
    /// menu appearing; anything else within the wait bound is a failed
    /// login.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ScrapeError> {
        self.session
            .navigate(&format!("{}/signin", self.base_url))
            .await?;
        self.session
            .wait_for_selector(LOGIN_EMAIL, self.timeout)
            .await?;

        self.session.fill(LOGIN_EMAIL, &credentials.username).await?;
        self.session
            .fill(LOGIN_PASSWORD, &credentials.password)
            .await?;
        self.session.click_selector(SIGN_IN_BUTTON).await?;

        match self.session.wait_for_selector(TOP_MENU, self.timeout).await {
            Ok(()) => {
                info!("Login successful");
                Ok(())
            }
            Err(BrowserError::Timeout(_)) => Err(ScrapeError::LoginFailed),
            Err(e) => Err(e.into()),
        }
    }

    /// Scrape the full bill of materials for one set.
    pub async fn part_list(&self, set_number: &str) -> Result<Vec<PartRecord>, ScrapeError> {
        self.goto_sets_page().await?;

        match search_for_set(self.session, set_number, self.timeout).await? {
            SetMatch::NotFound => return Err(ScrapeError::SetNotFound(set_number.to_string())),
            SetMatch::Unique | SetMatch::Ambiguous { .. } => {}
        }

        self.open_parts_view().await?;

        let table = LivePartsTable::new(self.session);
        let parts = Paginator::new(&table, self.timeout).run().await?;
        info!("Scraped {} parts for set {set_number}", parts.len());
        Ok(parts)
    }

    async fn goto_sets_page(&self) -> Result<(), ScrapeError> {
        self.session
            .navigate(&format!("{}/sets", self.base_url))
            .await?;
        self.session
            .wait_for_selector(SETS_FILTER, self.timeout)
            .await?;
        debug!("Sets table loaded");
        Ok(())
    }

    /// Open the matched set's parts view from the first result row.
    async fn open_parts_view(&self) -> Result<(), ScrapeError> {
        self.session.click_selector(FIRST_ROW_PARTS_BUTTON).await?;
        self.session
            .wait_for_selector(PARTS_TABLE, self.timeout)
            .await?;
        self.session
            .wait_until_hidden(PARTS_PROCESSING, self.timeout)
            .await?;
        debug!("Parts table loaded");
        Ok(())
    }
}
