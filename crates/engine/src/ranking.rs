//! Deterministic evidence ranking.
//!
//! Pure functions, no I/O: candidates are ordered descending by
//! `rating + votes * 0.01`, with absent metadata scored as zero. Ties keep
//! their original retrieval order (`sort_by` is stable), so ranking is
//! reproducible and idempotent.

use crate::evidence::EvidenceItem;

/// Weight applied to the vote count when scoring.
const VOTE_WEIGHT: f64 = 0.01;

/// Score a single evidence item.
///
/// Missing `rating` or `votes` contribute zero.
pub fn score(item: &EvidenceItem) -> f64 {
    let rating = item.metadata.rating.unwrap_or(0.0);
    let votes = item.metadata.votes.unwrap_or(0.0);
    rating + votes * VOTE_WEIGHT
}

/// Reorder evidence items descending by score.
///
/// Never drops or adds items: the output has the same cardinality and the
/// same multiset of items as the input.
pub fn rank(mut items: Vec<EvidenceItem>) -> Vec<EvidenceItem> {
    items.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::EvidenceMetadata;

    fn item(text: &str, rating: Option<f64>, votes: Option<f64>) -> EvidenceItem {
        EvidenceItem::new(
            text,
            EvidenceMetadata {
                brand: "acme".to_string(),
                product: "widget".to_string(),
                rating,
                votes,
            },
        )
    }

    #[test]
    fn test_score_combines_rating_and_votes() {
        assert_eq!(score(&item("a", Some(4.0), Some(10.0))), 4.1);
        assert_eq!(score(&item("b", Some(5.0), Some(20.0))), 5.2);
    }

    #[test]
    fn test_score_missing_metadata_is_zero() {
        assert_eq!(score(&item("a", None, None)), 0.0);
        assert_eq!(score(&item("b", None, Some(50.0))), 0.5);
        assert_eq!(score(&item("c", Some(3.0), None)), 3.0);
    }

    #[test]
    fn test_rank_orders_descending() {
        let items = vec![
            item("one", Some(4.0), Some(10.0)),   // 4.1
            item("two", Some(5.0), Some(20.0)),   // 5.2
            item("three", Some(3.0), Some(5.0)),  // 3.05
        ];

        let ranked = rank(items);
        let texts: Vec<&str> = ranked.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "one", "three"]);
    }

    #[test]
    fn test_rank_preserves_cardinality_and_items() {
        let items = vec![
            item("a", Some(1.0), None),
            item("b", None, None),
            item("c", Some(5.0), Some(1.0)),
        ];
        let ranked = rank(items.clone());

        assert_eq!(ranked.len(), items.len());
        for original in &items {
            assert!(ranked.contains(original));
        }
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let items = vec![
            item("first", Some(4.0), None),
            item("second", Some(4.0), None),
            item("third", Some(4.0), None),
        ];

        let ranked = rank(items);
        let texts: Vec<&str> = ranked.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let items = vec![
            item("a", Some(2.0), Some(3.0)),
            item("b", Some(2.0), Some(3.0)),
            item("c", Some(5.0), None),
            item("d", None, Some(7.0)),
        ];

        let once = rank(items);
        let twice = rank(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
