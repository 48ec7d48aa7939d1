//! Shared application state

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::task::JoinHandle;

use crate::application::services::SheetService;
use crate::infrastructure::autosave::spawn_autosave;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::JsonCharacterFiles;
use crate::infrastructure::persistence::{PostgrestRepository, SqliteSnapshotStore};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// PostgREST repositories, also used directly for catalog lookups
    pub repository: PostgrestRepository,
    pub sheet: Arc<SheetService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = PostgrestRepository::new(&config.postgrest_url)
            .context("Invalid SHEET_POSTGREST_URL")?;

        let options = SqliteConnectOptions::from_str(&config.storage_url)
            .context("Invalid SHEET_STORAGE_URL")?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open local storage at {}", config.storage_url))?;
        let snapshots = SqliteSnapshotStore::new(pool)
            .await
            .context("Failed to prepare local storage")?;

        let sheet = SheetService::new(
            Arc::new(repository.characters()),
            Arc::new(snapshots),
            Arc::new(JsonCharacterFiles::new()),
        );
        sheet.restore_snapshot().await;

        Ok(Self {
            config,
            repository,
            sheet: Arc::new(sheet),
        })
    }

    pub fn spawn_autosave(&self) -> JoinHandle<()> {
        spawn_autosave(self.sheet.clone(), self.config.autosave_interval)
    }
}
