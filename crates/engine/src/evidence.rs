//! Evidence items retrieved from the document index.

use serde::{Deserialize, Serialize};

/// Structured metadata attached to an evidence item.
///
/// `rating` and `votes` are optional: absent values are treated as zero
/// when scoring, never as errors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvidenceMetadata {
    /// Brand name
    #[serde(default)]
    pub brand: String,

    /// Product name
    #[serde(default)]
    pub product: String,

    /// Star rating of the underlying review
    #[serde(default)]
    pub rating: Option<f64>,

    /// Helpful-vote count of the underlying review
    #[serde(default)]
    pub votes: Option<f64>,
}

/// A unit of retrievable content: normalized review text plus metadata.
///
/// Immutable once retrieved; each pipeline invocation owns the items it
/// fetched, with no cross-query sharing or caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Normalized body content
    pub text: String,

    /// Structured metadata
    pub metadata: EvidenceMetadata,
}

impl EvidenceItem {
    /// Create an evidence item from text and metadata.
    pub fn new(text: impl Into<String>, metadata: EvidenceMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Normalize body text for indexing: lowercase and collapse all runs of
/// whitespace (including newlines) into single spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
