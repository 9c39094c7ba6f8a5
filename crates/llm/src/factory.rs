//! Generation-service provider factory.
//!
//! This module provides a factory for creating clients based on
//! application configuration.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use revlens_core::{AppError, AppResult};
use std::sync::Arc;

/// Create a generation-service client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama")
/// * `endpoint` - Optional custom endpoint URL
///
/// # Returns
/// A reference-counted trait object implementing `LlmClient`
///
/// # Errors
/// Returns error if the provider is unknown or not yet implemented.
pub fn create_client(provider: &str, endpoint: Option<&str>) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let client = OllamaClient::with_base_url(base_url);
            Ok(Arc::new(client))
        }
        "openai" | "claude" | "anthropic" => Err(AppError::Llm(format!(
            "Provider '{}' not yet implemented",
            provider
        ))),
        _ => Err(AppError::Llm(format!("Unknown provider: {}", provider))),
    }
}
