//! Query routing between the answer pipeline and the review store.
//!
//! Structured intents (`count`, `list`, `aggregation`) are served by fixed
//! parametrized read queries against the review store; open-ended intents
//! (`recommendation`, `semantic`) go through the RAG answer pipeline.

use crate::intent::{self, Intent};
use crate::pipeline::AnswerPipeline;
use revlens_core::AppResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-brand average rating, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAverage {
    pub brand: String,
    pub avg_rating: f64,
}

/// Boundary to the external structured review store.
///
/// Read-only: these three query shapes are the only access the routing
/// layer has.
pub trait GraphStore: Send + Sync {
    /// Count of distinct brands.
    fn count_brands(&self) -> AppResult<u64>;

    /// Distinct brand names, sorted.
    fn list_brands(&self) -> AppResult<Vec<String>>;

    /// Per-brand average rating, rounded to 2 decimals, descending by
    /// average.
    fn brand_rating_averages(&self) -> AppResult<Vec<BrandAverage>>;
}

/// Routed query result, shaped by the intent that served it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoutedAnswer {
    /// Count of distinct brands
    BrandCount(u64),
    /// Distinct brand names
    Brands(Vec<String>),
    /// Per-brand average ratings, descending
    BrandAverages(Vec<BrandAverage>),
    /// Free-text answer from the RAG pipeline
    Answer(String),
}

/// Dispatches queries to the store or the pipeline by classified intent.
pub struct QueryRouter {
    store: Arc<dyn GraphStore>,
    pipeline: AnswerPipeline,
}

impl QueryRouter {
    /// Create a router over the store and the answer pipeline.
    pub fn new(store: Arc<dyn GraphStore>, pipeline: AnswerPipeline) -> Self {
        Self { store, pipeline }
    }

    /// Route a query and produce its answer.
    pub async fn route(&self, query: &str) -> AppResult<RoutedAnswer> {
        let intent = intent::classify(query);
        tracing::info!("Routing query with intent '{}'", intent);

        match intent {
            Intent::Count => Ok(RoutedAnswer::BrandCount(self.store.count_brands()?)),
            Intent::List => Ok(RoutedAnswer::Brands(self.store.list_brands()?)),
            Intent::Aggregation => Ok(RoutedAnswer::BrandAverages(
                self.store.brand_rating_averages()?,
            )),
            Intent::Recommendation | Intent::Semantic => {
                Ok(RoutedAnswer::Answer(self.pipeline.answer(query).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{EvidenceItem, EvidenceMetadata};
    use crate::retrieval::DocumentIndex;
    use async_trait::async_trait;
    use revlens_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};

    struct FakeStore;

    impl GraphStore for FakeStore {
        fn count_brands(&self) -> AppResult<u64> {
            Ok(3)
        }

        fn list_brands(&self) -> AppResult<Vec<String>> {
            Ok(vec!["apple".to_string(), "nokia".to_string(), "samsung".to_string()])
        }

        fn brand_rating_averages(&self) -> AppResult<Vec<BrandAverage>> {
            Ok(vec![
                BrandAverage {
                    brand: "apple".to_string(),
                    avg_rating: 4.5,
                },
                BrandAverage {
                    brand: "nokia".to_string(),
                    avg_rating: 3.9,
                },
            ])
        }
    }

    struct EmptyIndex;

    #[async_trait]
    impl DocumentIndex for EmptyIndex {
        async fn similarity_search(
            &self,
            _query: &str,
            _k: usize,
        ) -> AppResult<Vec<EvidenceItem>> {
            Ok(vec![EvidenceItem::new(
                "a review",
                EvidenceMetadata::default(),
            )])
        }
    }

    struct CannedClient;

    #[async_trait]
    impl LlmClient for CannedClient {
        fn provider_name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
            Ok(LlmResponse {
                content: "A fine budget phone.".to_string(),
                model: request.model.clone(),
                usage: LlmUsage::default(),
            })
        }
    }

    fn router() -> QueryRouter {
        let pipeline =
            AnswerPipeline::new(Arc::new(EmptyIndex), Arc::new(CannedClient), "test-model");
        QueryRouter::new(Arc::new(FakeStore), pipeline)
    }

    #[tokio::test]
    async fn test_count_query_routes_to_store() {
        let answer = router().route("How many brands are there?").await.unwrap();
        assert_eq!(answer, RoutedAnswer::BrandCount(3));
    }

    #[tokio::test]
    async fn test_list_query_routes_to_store() {
        let answer = router().route("show all brands").await.unwrap();
        match answer {
            RoutedAnswer::Brands(brands) => assert_eq!(brands.len(), 3),
            other => panic!("expected brand list, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_aggregation_query_routes_to_store() {
        let answer = router().route("average rating by brand").await.unwrap();
        match answer {
            RoutedAnswer::BrandAverages(rows) => {
                assert_eq!(rows[0].brand, "apple");
                assert_eq!(rows[0].avg_rating, 4.5);
            }
            other => panic!("expected brand averages, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_recommendation_query_routes_to_pipeline() {
        let answer = router().route("Recommend a good budget phone").await.unwrap();
        assert_eq!(
            answer,
            RoutedAnswer::Answer("A fine budget phone.".to_string())
        );
    }

    #[tokio::test]
    async fn test_semantic_query_routes_to_pipeline() {
        let answer = router().route("tell me about the camera").await.unwrap();
        assert!(matches!(answer, RoutedAnswer::Answer(_)));
    }
}
