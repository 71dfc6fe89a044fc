//! Navigation and bounded waits on observable page state.
//!
//! Every wait polls at a fixed interval and fails with
//! [`BrowserError::Timeout`] once the caller's deadline passes. There are
//! no unbounded loops anywhere on the scrape path.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use super::PageSession;
use crate::error::BrowserError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

impl PageSession {
    /// Navigate to a URL and wait for the document to load.
    pub async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            if !error.is_empty() {
                return Err(BrowserError::NavigationFailed(error.to_string()));
            }
        }

        self.wait_for_load().await?;
        debug!("Navigated to {url}");
        Ok(())
    }

    /// Poll `document.readyState` until the page has loaded.
    pub async fn wait_for_load(&self) -> Result<(), BrowserError> {
        let start = Instant::now();
        loop {
            let state = self.evaluate("document.readyState").await?;
            if matches!(state.as_str(), Some("complete") | Some("interactive")) {
                return Ok(());
            }
            if start.elapsed() > LOAD_TIMEOUT {
                return Err(BrowserError::Timeout("Page load".to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until an element matching the selector exists.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let start = Instant::now();
        loop {
            if self.exists(selector).await? {
                return Ok(());
            }
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for element '{selector}'"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait until the selector matches nothing, or matches only elements
    /// that are not rendered.
    pub async fn wait_until_hidden(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let start = Instant::now();
        loop {
            if self.is_hidden(selector).await? {
                return Ok(());
            }
            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(format!(
                    "Waiting for '{selector}' to hide"
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
