//! Embedding providers for the in-memory document index.
//!
//! Two implementations: `OllamaProvider` calls the local Ollama embeddings
//! API, and `HashProvider` produces deterministic word-hash vectors for
//! offline use and tests. Both return L2-normalized vectors so the index
//! can score with a plain dot product.

use revlens_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

/// Request timeout for embedding calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Dimensionality of the hash provider's vectors.
const HASH_DIMENSIONS: usize = 256;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get provider name (e.g., "ollama", "hash")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Generate normalized embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate a normalized embedding for a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Retrieval("No embedding returned".to_string()))
    }
}

/// L2-normalize a vector in place. Zero vectors are left unchanged.
pub fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Request payload for the Ollama embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Ollama embedding provider using the local API.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a provider for the given endpoint and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::Retrieval(format!("Failed to create HTTP client for Ollama: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    async fn embed_one(&self, text: &str) -> AppResult<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Ollama embeddings API error ({}): {}",
                status, error_text
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Retrieval(format!("Failed to parse embedding: {}", e)))?;

        let mut embedding = body.embedding;
        normalize(&mut embedding);
        Ok(embedding)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        tracing::debug!("Embedding {} texts via Ollama", texts.len());

        // The embeddings endpoint takes one prompt per call.
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed_one(text).await?);
        }
        Ok(results)
    }
}

/// Deterministic word-hash embedding provider.
///
/// Not semantically accurate like a real embedding model, but produces
/// consistent content-dependent vectors: texts sharing words land near
/// each other. Suitable for offline use and tests.
pub struct HashProvider {
    dimensions: usize,
}

impl HashProvider {
    /// Create a hash provider with the default dimensionality.
    pub fn new() -> Self {
        Self {
            dimensions: HASH_DIMENSIONS,
        }
    }

    /// Create a hash provider with explicit dimensionality.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for word in text.to_lowercase().split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let dim = (hasher.finish() as usize) % self.dimensions;
            embedding[dim] += 1.0;
        }

        normalize(&mut embedding);
        embedding
    }
}

impl Default for HashProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashProvider {
    fn provider_name(&self) -> &str {
        "hash"
    }

    fn model_name(&self) -> &str {
        "word-hash"
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}

/// Create an embedding provider based on the provider name.
pub fn create_provider(
    provider: &str,
    endpoint: &str,
    model: &str,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match provider.to_lowercase().as_str() {
        "ollama" => Ok(Arc::new(OllamaProvider::new(endpoint, model)?)),
        "hash" => Ok(Arc::new(HashProvider::new())),
        _ => Err(AppError::Retrieval(format!(
            "Unknown embedding provider: '{}'. Supported: ollama, hash",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_provider_is_deterministic() {
        let provider = HashProvider::new();
        let a = provider.embed("great budget phone").await.unwrap();
        let b = provider.embed("great budget phone").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_hash_provider_vectors_are_normalized() {
        let provider = HashProvider::new();
        let v = provider.embed("some words here").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_hash_provider_shared_words_score_higher() {
        let provider = HashProvider::new();
        let query = provider.embed("battery life").await.unwrap();
        let related = provider.embed("battery life is great").await.unwrap();
        let unrelated = provider.embed("screen brightness poor").await.unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        let mut v = vec![0.0f32; 4];
        normalize(&mut v);
        assert_eq!(v, vec![0.0; 4]);
    }

    #[test]
    fn test_create_provider_unknown() {
        assert!(create_provider("bogus", "http://localhost:11434", "m").is_err());
    }
}
