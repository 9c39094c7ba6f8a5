//! Ask command handler.
//!
//! Classifies the question, routes it to the structured store or the RAG
//! pipeline, and prints the answer.

use crate::commands::{build_router, render};
use clap::Args;
use revlens_core::{AppConfig, AppError, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: String,

    /// Output the routed answer as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::Config("Question must not be empty".to_string()));
        }

        let router = build_router(config).await?;
        let answer = router.route(query).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&answer)?);
        } else {
            render(&answer);
        }

        Ok(())
    }
}
