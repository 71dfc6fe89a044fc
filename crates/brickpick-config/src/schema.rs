//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

/// Inventory service account and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Service account email. Usually `${INSTABRICK_USERNAME}` in the file.
    #[serde(default)]
    pub username: String,

    /// Service account password. Usually `${INSTABRICK_PASSWORD}` in the file.
    #[serde(default)]
    pub password: String,
}

impl ServiceConfig {
    /// Credentials, or an error naming the first missing field.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if self.username.is_empty() {
            return Err(ConfigError::MissingField("service.username".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingField("service.password".to_string()));
        }
        Ok(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: String::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://app.instabrick.org".to_string()
}

/// A validated username/password pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Explicit Chrome binary; autodetected when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_headless")]
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            debug_port: default_debug_port(),
            headless: default_headless(),
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_headless() -> bool {
    true
}

/// Scrape behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Upper bound for every wait on observable page state.
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Where per-set part lists and pick lists are written.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: default_page_timeout(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_page_timeout() -> u64 {
    10
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Own-inventory inputs and filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    #[serde(default = "default_color_file")]
    pub color_file: PathBuf,

    /// Locations containing any of these substrings never participate in
    /// pick-list matching. Absent ⇒ no filtering.
    #[serde(default)]
    pub ignore_strings: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            export_file: default_export_file(),
            color_file: default_color_file(),
            ignore_strings: Vec::new(),
        }
    }
}

fn default_export_file() -> PathBuf {
    PathBuf::from("data/inventory.xml")
}

fn default_color_file() -> PathBuf {
    PathBuf::from("data/colors.csv")
}
