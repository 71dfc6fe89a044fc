//! brickpick — pick-list generator for a browser-managed LEGO inventory.
//!
//! Two subcommands cover the workflow: `part-list` drives a headless
//! browser through the inventory service to scrape a set's bill of
//! materials, and `pick-list` reconciles that bill of materials against
//! the user's own inventory export to produce a sorted storage walk.

use std::path::PathBuf;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brickpick_browser::{CdpClient, Chrome, LaunchOptions};
use brickpick_config::{Config, ConfigLoader, Credentials};
use brickpick_core::{
    ColorMap, PartRecord, build_pick_list, parse_inventory_file, part_list_path, pick_list_path,
    read_part_list, write_part_list, write_pick_list,
};
use brickpick_scraper::ServiceSession;

/// brickpick CLI.
#[derive(Parser)]
#[command(name = "brickpick")]
#[command(about = "Pick-list generator for a browser-managed LEGO parts inventory")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "brickpick.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a set's bill of materials into its part-list CSV
    PartList {
        /// Set number; "-1" is assumed when no variant suffix is given
        set_number: String,
    },

    /// Reconcile a set's part list against the inventory export
    PickList {
        /// Set number; "-1" is assumed when no variant suffix is given
        set_number: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return;
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigLoader::load_or_default(&cli.config)?;

    match cli.command {
        Commands::PartList { set_number } => part_list(&config, &set_number).await,
        Commands::PickList { set_number } => pick_list(&config, &set_number),
    }
}

/// Append the default variant suffix when none is given.
fn normalize_set_number(set_number: &str) -> String {
    if set_number.contains('-') {
        set_number.to_string()
    } else {
        format!("{set_number}-1")
    }
}

async fn part_list(config: &Config, set_number: &str) -> anyhow::Result<()> {
    let set_number = normalize_set_number(set_number);
    info!("Scraping part list for set {set_number}");

    // Fail on missing credentials before a browser is launched.
    let credentials = config.service.credentials()?;

    let chrome = Chrome::launch(&LaunchOptions {
        chrome_path: config.browser.chrome_path.clone(),
        debug_port: config.browser.debug_port,
        headless: config.browser.headless,
    })
    .await?;

    // Hold the scrape result until the browser is down, so the session is
    // released on the failure paths too.
    let result = scrape_part_list(&chrome, config, &credentials, &set_number).await;
    chrome.shutdown().await?;
    let parts = result?;

    let path = part_list_path(&config.scrape.data_dir, &set_number);
    write_part_list(&path, &parts)?;
    info!("Part list saved to {}", path.display());
    Ok(())
}

async fn scrape_part_list(
    chrome: &Chrome,
    config: &Config,
    credentials: &Credentials,
    set_number: &str,
) -> anyhow::Result<Vec<PartRecord>> {
    let client = CdpClient::connect(chrome.endpoint()).await?;
    let page = client.new_page("about:blank").await?;

    let service = ServiceSession::new(
        &page,
        config.service.base_url.clone(),
        Duration::from_secs(config.scrape.page_timeout_secs),
    );
    service.login(credentials).await?;
    let parts = service.part_list(set_number).await?;

    client.close_page(page.target_id()).await?;
    Ok(parts)
}

fn pick_list(config: &Config, set_number: &str) -> anyhow::Result<()> {
    let set_number = normalize_set_number(set_number);
    info!("Building pick list for set {set_number}");

    let colors = ColorMap::from_path(&config.inventory.color_file)?;
    let inventory = parse_inventory_file(
        &config.inventory.export_file,
        &config.inventory.ignore_strings,
    )?;
    let required = read_part_list(&part_list_path(&config.scrape.data_dir, &set_number))?;

    let entries = build_pick_list(&required, &colors, &inventory);

    let path = pick_list_path(&config.scrape.data_dir, &set_number);
    write_pick_list(&path, &entries)?;
    info!("Pick list saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_default_variant() {
        assert_eq!(normalize_set_number("10294"), "10294-1");
    }

    #[test]
    fn test_normalize_keeps_explicit_variant() {
        assert_eq!(normalize_set_number("10294-1"), "10294-1");
        assert_eq!(normalize_set_number("40498-2"), "40498-2");
    }
}
