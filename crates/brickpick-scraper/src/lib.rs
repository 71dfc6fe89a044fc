//! # brickpick Scraper
//!
//! Drives the inventory service through a [`brickpick_browser::PageSession`]
//! to harvest a set's full bill of materials:
//!
//! 1. log in and open the sets table;
//! 2. filter it down to the requested set (not-found and ambiguous matches
//!    are classified, never guessed silently);
//! 3. open the set's parts view and walk every page of the
//!    client-rendered table, waiting on the results summary between steps
//!    so no page is read before it has rendered;
//! 4. extract each captured page's rows into typed [`PartRecord`]s.
//!
//! The pagination protocol lives behind the [`PartsTable`] trait so it can
//! be exercised against a scripted table without a browser.
//!
//! [`PartRecord`]: brickpick_core::PartRecord

mod error;
mod extract;
mod paginate;
mod search;
mod site;
mod table;

pub use error::ScrapeError;
pub use extract::extract_rows;
pub use paginate::{Paginator, PartsTable};
pub use search::SetMatch;
pub use site::ServiceSession;
