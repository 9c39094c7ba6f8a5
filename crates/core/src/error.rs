//! Error types for the Revlens CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, generation service, retrieval,
//! review store, and ingestion errors.

use thiserror::Error;

/// Unified error type for the Revlens CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation-service (LLM) errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document-index and retrieval errors
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Review-store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Corpus ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
