//! Revlens CLI
//!
//! Main entry point for the revlens command-line tool.
//! Answers natural-language questions about a product-review corpus by
//! routing each query to a structured store query or a local-first RAG
//! pipeline.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, ReplCommand, StatsCommand};
use revlens_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Revlens CLI - review Q&A with local-first RAG
#[derive(Parser, Debug)]
#[command(name = "revlens")]
#[command(about = "Review Q&A with local-first RAG", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the data directory (default: .revlens)
    #[arg(short, long, global = true, env = "REVLENS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "REVLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generation-service provider (ollama)
    #[arg(short, long, global = true, env = "REVLENS_PROVIDER")]
    provider: Option<String>,

    /// Chat model identifier
    #[arg(short, long, global = true, env = "REVLENS_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a review CSV into the local store
    Ingest(IngestCommand),

    /// Ask a single question
    Ask(AskCommand),

    /// Interactive question loop
    Repl(ReplCommand),

    /// Show store statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.data_dir,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Revlens CLI starting");
    tracing::debug!("Data dir: {:?}", config.data_dir);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;
    config.ensure_data_dir()?;

    let command_name = match &cli.command {
        Commands::Ingest(_) => "ingest",
        Commands::Ask(_) => "ask",
        Commands::Repl(_) => "repl",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ingest(cmd) => cmd.execute(&config),
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Repl(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
