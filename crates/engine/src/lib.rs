//! Revlens answering engine.
//!
//! This crate implements query routing and the retrieval-augmented answer
//! pipeline over a product-review corpus, plus the concrete collaborators
//! the pipeline depends on:
//!
//! - [`intent`] — keyword-based intent classification
//! - [`evidence`] — evidence items and text normalization
//! - [`retrieval`] — document-index boundary and over-fetching retriever
//! - [`ranking`] — deterministic evidence scoring and ordering
//! - [`synthesis`] — prompt assembly and generation-service invocation
//! - [`validate`] — single-pass answer sanity gate
//! - [`pipeline`] — the four-stage answer chain
//! - [`routing`] — intent dispatch between the pipeline and the review store
//! - [`embeddings`] — embedding providers for the in-memory index
//! - [`index`] — in-memory cosine-similarity document index
//! - [`store`] — SQLite-backed review store with the fixed structured queries
//! - [`ingest`] — CSV corpus loading

pub mod embeddings;
pub mod evidence;
pub mod index;
pub mod ingest;
pub mod intent;
pub mod pipeline;
pub mod ranking;
pub mod retrieval;
pub mod routing;
pub mod store;
pub mod synthesis;
pub mod validate;

pub use evidence::{EvidenceItem, EvidenceMetadata};
pub use intent::Intent;
pub use pipeline::AnswerPipeline;
pub use retrieval::DocumentIndex;
pub use routing::{BrandAverage, GraphStore, QueryRouter, RoutedAnswer};
