//! Wildcard Sheet - Savage Worlds character sheet
//!
//! The binary edits one character at a time:
//! - Keeps it in a local SQLite snapshot between runs
//! - Exports and imports it as a JSON file
//! - Saves and loads it through a PostgREST data API
//! - Looks up rulebook entries in the database catalogs

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wildcard_sheet::infrastructure::config::AppConfig;
use wildcard_sheet::infrastructure::state::AppState;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging; stdout belongs to the sheet
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildcard_sheet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::from_env()?;
    tracing::debug!("Configuration loaded");
    tracing::debug!("  PostgREST: {}", config.postgrest_url);
    tracing::debug!("  Storage: {}", config.storage_url);

    let state = AppState::new(config).await?;

    cli::run(cli.command, &state).await
}
