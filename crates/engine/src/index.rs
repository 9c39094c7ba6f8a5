//! In-memory document index.
//!
//! Embeds each evidence document once at build time and answers
//! similarity searches by cosine over normalized vectors (a dot product,
//! since both sides are unit length). Search returns fresh clones, so
//! each pipeline invocation owns its evidence.

use crate::embeddings::{normalize, EmbeddingProvider};
use crate::evidence::EvidenceItem;
use crate::retrieval::DocumentIndex;
use async_trait::async_trait;
use revlens_core::AppResult;
use std::sync::Arc;

/// Embedded document entry.
struct Entry {
    item: EvidenceItem,
    embedding: Vec<f32>,
}

/// In-memory vector index over evidence documents.
pub struct MemoryIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: Vec<Entry>,
}

impl MemoryIndex {
    /// Create an empty index over an embedding provider.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
        }
    }

    /// Embed and add documents to the index.
    pub async fn add_documents(&mut self, items: Vec<EvidenceItem>) -> AppResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = items.iter().map(|i| i.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        for (item, mut embedding) in items.into_iter().zip(embeddings) {
            normalize(&mut embedding);
            self.entries.push(Entry { item, embedding });
        }

        tracing::info!("Index now holds {} documents", self.entries.len());
        Ok(())
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[async_trait]
impl DocumentIndex for MemoryIndex {
    async fn similarity_search(&self, query: &str, k: usize) -> AppResult<Vec<EvidenceItem>> {
        let query_embedding = self.embedder.embed(query).await?;

        let mut scored: Vec<(f32, &Entry)> = self
            .entries
            .iter()
            .map(|entry| (dot(&query_embedding, &entry.embedding), entry))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, entry)| entry.item.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashProvider;
    use crate::evidence::EvidenceMetadata;

    fn item(text: &str) -> EvidenceItem {
        EvidenceItem::new(text, EvidenceMetadata::default())
    }

    async fn index_with(texts: &[&str]) -> MemoryIndex {
        let mut index = MemoryIndex::new(Arc::new(HashProvider::new()));
        index
            .add_documents(texts.iter().map(|t| item(t)).collect())
            .await
            .unwrap();
        index
    }

    #[tokio::test]
    async fn test_empty_index_returns_nothing() {
        let index = MemoryIndex::new(Arc::new(HashProvider::new()));
        assert!(index.is_empty());
        let results = index.similarity_search("anything", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_honors_k() {
        let index = index_with(&["doc one", "doc two", "doc three"]).await;
        assert_eq!(index.len(), 3);

        let results = index.similarity_search("doc", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_ranks_by_word_overlap() {
        let index = index_with(&[
            "the pasta recipe needs tomatoes",
            "battery life on this phone is excellent",
        ])
        .await;

        let results = index
            .similarity_search("how is the battery life", 2)
            .await
            .unwrap();
        assert!(results[0].text.contains("battery"));
    }

    #[tokio::test]
    async fn test_search_k_larger_than_index() {
        let index = index_with(&["only doc"]).await;
        let results = index.similarity_search("only", 50).await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
