//! Answer synthesis via the generation service.
//!
//! Builds a single prompt from the query and ranked evidence, sends it to
//! the generation service, and returns the completion unmodified. A
//! service failure is fatal for the pipeline invocation: no retry, no
//! fallback answer.

use crate::evidence::EvidenceItem;
use revlens_core::AppResult;
use revlens_llm::{LlmClient, LlmRequest};
use std::sync::Arc;

/// Sampling temperature for factual answering.
const ANSWER_TEMPERATURE: f32 = 0.3;

/// Build the synthesis prompt: evidence texts joined by blank lines,
/// wrapped in the fixed question/context template.
pub fn build_prompt(query: &str, evidence: &[EvidenceItem]) -> String {
    let context = evidence
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Question: {query}\n\nContext:\n{context}\n\nExplain clearly:")
}

/// Synthesizes natural-language answers from ranked evidence.
pub struct Synthesizer {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Synthesizer {
    /// Create a synthesizer over a generation-service client.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Produce an answer for the query from the ordered evidence.
    pub async fn synthesize(&self, query: &str, evidence: &[EvidenceItem]) -> AppResult<String> {
        let prompt = build_prompt(query, evidence);

        tracing::debug!(
            "Synthesizing answer ({} evidence items, prompt {} bytes)",
            evidence.len(),
            prompt.len()
        );

        let request =
            LlmRequest::new(prompt, &self.model).with_temperature(ANSWER_TEMPERATURE);
        let response = self.client.complete(&request).await?;

        Ok(response.content)
    }
}
