use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: &str = "3000";
const DEFAULT_LOGO_PATH: &str = "assets/code-logo.png";

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub logo_path: PathBuf,
    /// Selects the webhook reporter when set.
    pub error_report_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            logo_path: lookup("LOGO_PATH")
                .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string())
                .into(),
            error_report_url: lookup("ERROR_REPORT_URL").filter(|url| !url.trim().is_empty()),
        })
    }
}
