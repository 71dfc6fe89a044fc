//! Chrome process lifecycle.
//!
//! Every run launches its own headless Chrome against a scratch profile
//! directory; nothing is shared across invocations. The child is killed on
//! [`Chrome::shutdown`] and again from `Drop`, so the process goes away on
//! success and failure paths alike.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::error::BrowserError;

/// Chrome launch options.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit Chrome binary; autodetected when `None`.
    pub chrome_path: Option<PathBuf>,
    /// Remote debugging port.
    pub debug_port: u16,
    /// Run headless (the normal mode; visible Chrome is for debugging).
    pub headless: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            chrome_path: None,
            debug_port: 9222,
            headless: true,
        }
    }
}

/// A launched Chrome process with remote debugging enabled.
pub struct Chrome {
    child: Child,
    endpoint: String,
    /// Scratch profile; removed when the struct drops.
    _profile: TempDir,
}

impl Chrome {
    /// Find a Chrome/Chromium binary on this system.
    pub fn find_binary() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
        ];

        #[cfg(target_os = "linux")]
        let paths = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Launch Chrome and wait until its debugging endpoint answers.
    pub async fn launch(options: &LaunchOptions) -> Result<Self, BrowserError> {
        let binary = match &options.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_binary().ok_or(BrowserError::ChromeNotFound)?,
        };

        let profile = TempDir::new().map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let mut cmd = Command::new(&binary);
        cmd.arg(format!("--remote-debugging-port={}", options.debug_port))
            .arg(format!("--user-data-dir={}", profile.path().display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--metrics-recording-only")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if options.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Launched Chrome (pid {:?}) from {}", child.id(), binary.display());

        let endpoint = format!("http://localhost:{}", options.debug_port);
        let chrome = Self {
            child,
            endpoint,
            _profile: profile,
        };
        chrome.wait_until_ready().await?;
        Ok(chrome)
    }

    /// Poll `/json/version` until the endpoint answers.
    async fn wait_until_ready(&self) -> Result<(), BrowserError> {
        // 30 * 200ms = 6 seconds
        for _ in 0..30 {
            if reqwest::get(format!("{}/json/version", self.endpoint))
                .await
                .is_ok()
            {
                debug!("Chrome debugging endpoint ready at {}", self.endpoint);
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Err(BrowserError::LaunchFailed(
            "Chrome did not open its debugging endpoint in time".to_string(),
        ))
    }

    /// CDP discovery endpoint, e.g. `http://localhost:9222`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Kill the browser process and wait for it to exit.
    pub async fn shutdown(mut self) -> Result<(), BrowserError> {
        info!("Shutting down Chrome");
        let _ = self.child.kill().await;
        Ok(())
    }
}

impl Drop for Chrome {
    fn drop(&mut self) {
        if let Err(e) = self.child.start_kill() {
            warn!("Failed to kill Chrome on drop: {}", e);
        }
    }
}
