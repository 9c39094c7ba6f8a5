//! Stats command handler.

use clap::Args;
use revlens_core::{AppConfig, AppResult};
use revlens_engine::store::SqliteStore;

/// Show store statistics
#[derive(Args, Debug)]
pub struct StatsCommand {}

impl StatsCommand {
    /// Execute the stats command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = SqliteStore::open(&config.store_path())?;
        let stats = store.stats()?;

        println!("Brands:   {}", stats.brands);
        println!("Products: {}", stats.products);
        println!("Reviews:  {}", stats.reviews);

        Ok(())
    }
}
