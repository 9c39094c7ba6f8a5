//! Ingest command handler.

use clap::Args;
use revlens_core::{AppConfig, AppResult};
use revlens_engine::ingest::ingest_csv;
use revlens_engine::store::SqliteStore;
use std::path::PathBuf;

/// Load a review CSV into the local store
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Path to the review CSV file
    pub csv: PathBuf,
}

impl IngestCommand {
    /// Execute the ingest command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command");

        let store = SqliteStore::open(&config.store_path())?;
        let report = ingest_csv(&store, &self.csv)?;

        println!(
            "Loaded {} reviews ({} rows skipped, {} malformed)",
            report.loaded, report.skipped, report.malformed
        );

        let stats = store.stats()?;
        println!(
            "Store now holds {} brands, {} products, {} reviews",
            stats.brands, stats.products, stats.reviews
        );

        Ok(())
    }
}
