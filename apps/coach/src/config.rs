use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "career-coach";

/// Process configuration loaded from environment variables.
/// Provider settings are not read here; they live in the configuration store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the local storage records.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = match std::env::var_os("COACH_DATA_DIR") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        Ok(Config {
            data_dir,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Could not determine a data directory; set COACH_DATA_DIR")
}
