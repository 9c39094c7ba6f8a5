//! The retrieval-augmented answer pipeline.
//!
//! Chains Retriever → Ranker → Synthesizer → Validator, each stage
//! strictly dependent on the previous stage's output. No partial results
//! are exposed: a failure at any stage aborts the invocation with that
//! stage's error. Stateless across invocations — no caching and no
//! memoization of repeated queries.

use crate::ranking;
use crate::retrieval::{DocumentIndex, Retriever};
use crate::synthesis::Synthesizer;
use crate::validate;
use revlens_core::AppResult;
use revlens_llm::LlmClient;
use std::sync::Arc;

/// Result count callers nominally ask for. Retrieval over-fetches past
/// this; see [`Retriever::retrieve`].
const DEFAULT_TOP_K: usize = 5;

/// Four-stage answer pipeline over injected collaborators.
///
/// The document index and generation service are shared read-only
/// dependencies injected once at construction and never mutated.
pub struct AnswerPipeline {
    retriever: Retriever,
    synthesizer: Synthesizer,
}

impl AnswerPipeline {
    /// Create a pipeline with the default retrieval pool size.
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            retriever: Retriever::new(index),
            synthesizer: Synthesizer::new(client, model),
        }
    }

    /// Create a pipeline with an explicit retrieval pool size.
    pub fn with_pool_size(
        index: Arc<dyn DocumentIndex>,
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        pool_size: usize,
    ) -> Self {
        Self {
            retriever: Retriever::with_pool_size(index, pool_size),
            synthesizer: Synthesizer::new(client, model),
        }
    }

    /// Answer a query: retrieve, rank, synthesize, validate.
    ///
    /// The returned answer is guaranteed non-empty: degenerate completions
    /// are replaced by the validator's fixed advisory string.
    pub async fn answer(&self, query: &str) -> AppResult<String> {
        tracing::info!("Answer pipeline invoked");

        let candidates = self.retriever.retrieve(query, DEFAULT_TOP_K).await?;
        let ranked = ranking::rank(candidates);
        let draft = self.synthesizer.synthesize(query, &ranked).await?;
        let answer = validate::validate(draft);

        tracing::info!("Answer pipeline completed ({} chars)", answer.len());
        Ok(answer)
    }
}
