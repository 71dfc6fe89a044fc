//! # brickpick Config
//!
//! Typed configuration for brickpick. Credentials and ignore rules are
//! explicit values threaded into each component's entry point; nothing is
//! read from ambient process state after load time.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
