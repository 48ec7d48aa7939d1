//! Application configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::value_objects::Language;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgREST base URL
    pub postgrest_url: String,

    /// SQLite URL of the local snapshot store
    pub storage_url: String,

    /// How often the character being edited is snapshotted locally
    pub autosave_interval: Duration,

    /// Language catalog lookups default to
    pub language: Language,

    /// Directory character files are exported to
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            postgrest_url: "http://localhost:3000".to_string(),
            storage_url: "sqlite://wildcard-sheet.db".to_string(),
            autosave_interval: Duration::from_secs(3),
            language: Language::En,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let autosave_interval = match lookup("SHEET_AUTOSAVE_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .context("SHEET_AUTOSAVE_SECS must be a whole number of seconds")?;
                anyhow::ensure!(secs > 0, "SHEET_AUTOSAVE_SECS must be greater than zero");
                Duration::from_secs(secs)
            }
            None => defaults.autosave_interval,
        };

        let language = match lookup("SHEET_LANGUAGE") {
            Some(raw) => raw
                .parse::<Language>()
                .context("SHEET_LANGUAGE must be one of: en, ru")?,
            None => defaults.language,
        };

        Ok(Self {
            postgrest_url: lookup("SHEET_POSTGREST_URL").unwrap_or(defaults.postgrest_url),
            storage_url: lookup("SHEET_STORAGE_URL").unwrap_or(defaults.storage_url),
            autosave_interval,
            language,
            export_dir: lookup("SHEET_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
        })
    }
}
