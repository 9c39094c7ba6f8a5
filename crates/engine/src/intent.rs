//! Keyword-based query intent classification.
//!
//! Classification is a pure function of the lowercased query text,
//! implemented as an ordered decision list: fixed keyword sets are tested
//! in strict priority order and the first match wins. A query matching
//! keywords from several categories resolves to the highest-priority
//! category, not the one with the most hits.

use std::fmt;

/// The classified purpose of a query, determining which handling path
/// serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Exact count of distinct brands
    Count,
    /// Listing of distinct brand names
    List,
    /// Open-ended recommendation, answered by the RAG pipeline
    Recommendation,
    /// Per-brand rating aggregation
    Aggregation,
    /// Anything else, answered by the RAG pipeline
    Semantic,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intent::Count => "count",
            Intent::List => "list",
            Intent::Recommendation => "recommendation",
            Intent::Aggregation => "aggregation",
            Intent::Semantic => "semantic",
        };
        f.write_str(label)
    }
}

/// Keyword sets in priority order. Reordering changes behavior: e.g.
/// "average rating recommendation" must classify as recommendation, not
/// aggregation, because the recommendation set is tested first.
const DECISION_LIST: &[(&[&str], Intent)] = &[
    (&["how many", "count", "total"], Intent::Count),
    (&["list", "which are", "what are", "show all"], Intent::List),
    (
        &["best", "recommend", "right choice", "suitable"],
        Intent::Recommendation,
    ),
    (&["average", "avg", "rating"], Intent::Aggregation),
];

/// Classify a raw query string into an [`Intent`].
///
/// Total over all inputs: queries matching no keyword set (including the
/// empty string) classify as [`Intent::Semantic`].
pub fn classify(query: &str) -> Intent {
    let q = query.to_lowercase();

    for (keywords, intent) in DECISION_LIST {
        if keywords.iter().any(|kw| q.contains(kw)) {
            return *intent;
        }
    }

    Intent::Semantic
}
