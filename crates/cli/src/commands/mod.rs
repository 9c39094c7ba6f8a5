//! Command handlers for the Revlens CLI.

pub mod ask;
pub mod ingest;
pub mod repl;
pub mod stats;

pub use ask::AskCommand;
pub use ingest::IngestCommand;
pub use repl::ReplCommand;
pub use stats::StatsCommand;

use revlens_core::{AppConfig, AppResult};
use revlens_engine::index::MemoryIndex;
use revlens_engine::store::SqliteStore;
use revlens_engine::{embeddings, ingest as corpus, AnswerPipeline, QueryRouter, RoutedAnswer};
use std::sync::Arc;

/// Assemble the query router: open the store, embed its reviews into the
/// in-memory index, and wire up the answer pipeline.
pub(crate) async fn build_router(config: &AppConfig) -> AppResult<QueryRouter> {
    let store = Arc::new(SqliteStore::open(&config.store_path())?);

    let evidence = corpus::build_evidence(store.as_ref())?;
    tracing::info!("Embedding {} review documents", evidence.len());

    let embedder = embeddings::create_provider(
        &config.embedding_provider,
        &config.endpoint,
        &config.embedding_model,
    )?;
    let mut index = MemoryIndex::new(embedder);
    index.add_documents(evidence).await?;

    let client = revlens_llm::create_client(&config.provider, Some(&config.endpoint))?;
    let pipeline = AnswerPipeline::with_pool_size(
        Arc::new(index),
        client,
        &config.model,
        config.retrieval_pool_size,
    );

    Ok(QueryRouter::new(store, pipeline))
}

/// Print a routed answer to stdout.
pub(crate) fn render(answer: &RoutedAnswer) {
    match answer {
        RoutedAnswer::BrandCount(count) => {
            println!("Total brands: {}", count);
        }
        RoutedAnswer::Brands(brands) => {
            println!("Brands:");
            for brand in brands {
                println!("- {}", brand);
            }
        }
        RoutedAnswer::BrandAverages(rows) => {
            println!("Average rating per brand:");
            for row in rows {
                println!("{}: {:.2}", row.brand, row.avg_rating);
            }
        }
        RoutedAnswer::Answer(text) => {
            println!("{}", text);
        }
    }
}
