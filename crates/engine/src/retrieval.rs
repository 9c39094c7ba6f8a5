//! Evidence retrieval over the document-index boundary.

use crate::evidence::EvidenceItem;
use async_trait::async_trait;
use revlens_core::config::DEFAULT_RETRIEVAL_POOL_SIZE;
use revlens_core::AppResult;
use std::sync::Arc;

/// Boundary to the external document index.
///
/// The index is append-only and externally maintained; the engine only
/// issues similarity searches against it.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Return the `k` evidence items most similar to `query`, best first.
    async fn similarity_search(&self, query: &str, k: usize) -> AppResult<Vec<EvidenceItem>>;
}

/// Fetches a candidate pool of evidence for a query.
pub struct Retriever {
    index: Arc<dyn DocumentIndex>,
    pool_size: usize,
}

impl Retriever {
    /// Create a retriever with the default candidate pool size.
    pub fn new(index: Arc<dyn DocumentIndex>) -> Self {
        Self::with_pool_size(index, DEFAULT_RETRIEVAL_POOL_SIZE)
    }

    /// Create a retriever with an explicit candidate pool size.
    pub fn with_pool_size(index: Arc<dyn DocumentIndex>, pool_size: usize) -> Self {
        Self { index, pool_size }
    }

    /// Retrieve the candidate pool for a query.
    ///
    /// The caller's requested result count `k` is accepted for interface
    /// compatibility but the fetch size is always the configured pool
    /// size: retrieval deliberately over-fetches so the ranker can
    /// re-score a wide pool. Index failures propagate as fatal retrieval
    /// errors.
    pub async fn retrieve(&self, query: &str, k: usize) -> AppResult<Vec<EvidenceItem>> {
        tracing::debug!(
            "Retrieving evidence (requested k: {}, pool size: {})",
            k,
            self.pool_size
        );

        let candidates = self.index.similarity_search(query, self.pool_size).await?;

        tracing::debug!("Retrieved {} candidates", candidates.len());
        Ok(candidates)
    }
}
