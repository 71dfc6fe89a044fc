//! CDP page session: one attached page, driven single-threaded.

mod input;
mod js;
mod wait;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use serde_json::Value;
use tracing::debug;

use crate::client::{PendingMap, WsSink, send_command};
use crate::error::BrowserError;

/// A session attached to a single page target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    pending: Arc<PendingMap>,
    request_id: Arc<AtomicU64>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
        pending: Arc<PendingMap>,
        request_id: Arc<AtomicU64>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            ws_tx,
            pending,
            request_id,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Send a CDP command scoped to this page.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, BrowserError> {
        send_command(
            &self.ws_tx,
            &self.pending,
            &self.request_id,
            method,
            params,
            Some(self.session_id.clone()),
        )
        .await
    }

    /// Enable the CDP domains this session drives.
    pub(crate) async fn enable_domains(&self) -> Result<(), BrowserError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }
}
