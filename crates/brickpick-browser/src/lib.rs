//! # brickpick Browser
//!
//! A small Chrome DevTools Protocol client, sized for driving one
//! client-rendered inventory page at a time.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  brickpick      │ ◄──────────────► │ headless Chrome  │
//! │  (this crate)   │       CDP        │ (launched here)  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! The crate launches its own headless Chrome with a scratch profile,
//! connects over the CDP WebSocket, and exposes a [`PageSession`] with the
//! handful of operations a table scraper needs: navigate, evaluate, fill,
//! click, read text, and bounded waits on observable page state. The
//! Chrome process is killed on [`Chrome::shutdown`] and again from `Drop`,
//! so the session is released on every exit path.

mod chrome;
mod client;
mod error;
mod protocol;
mod session;

pub use chrome::{Chrome, LaunchOptions};
pub use client::CdpClient;
pub use error::BrowserError;
pub use protocol::*;
pub use session::PageSession;
