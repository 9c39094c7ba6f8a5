//! Corpus ingestion.
//!
//! Reads a product-review CSV (the Amazon unlocked-mobile shape) into the
//! review store, and turns stored reviews into normalized evidence
//! documents for the in-memory index.

use crate::evidence::{normalize_text, EvidenceItem, EvidenceMetadata};
use crate::store::{ReviewRow, SqliteStore};
use revlens_core::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// One CSV row. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "product_name")]
    product: Option<String>,

    #[serde(rename = "brand_name")]
    brand: Option<String>,

    #[serde(rename = "ratings")]
    rating: Option<f64>,

    #[serde(rename = "reviews")]
    review: Option<String>,

    #[serde(rename = "review_votes")]
    votes: Option<f64>,
}

/// Outcome of a CSV ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestReport {
    /// Rows written to the store
    pub loaded: usize,

    /// Rows skipped for missing brand or product
    pub skipped: usize,

    /// Rows that failed to parse (e.g. non-numeric rating cells)
    pub malformed: usize,
}

/// Load a review CSV into the store.
///
/// Rows without both a brand and a product name are skipped, matching the
/// corpus's known gaps. Rows that fail to parse are counted as malformed
/// and left out rather than aborting the run; only a file that cannot be
/// opened is an error.
pub fn ingest_csv(store: &SqliteStore, path: &Path) -> AppResult<IngestReport> {
    tracing::info!("Ingesting reviews from {:?}", path);

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Ingest(format!("Failed to open CSV {:?}: {}", path, e)))?;

    let mut report = IngestReport::default();

    for result in reader.deserialize::<CsvRecord>() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping unparsable CSV row: {}", e);
                report.malformed += 1;
                continue;
            }
        };

        let (brand, product) = match (&record.brand, &record.product) {
            (Some(brand), Some(product)) if !brand.is_empty() && !product.is_empty() => {
                (brand.as_str(), product.as_str())
            }
            _ => {
                report.skipped += 1;
                continue;
            }
        };

        let body = record.review.as_deref().unwrap_or("");
        store.add_review(brand, product, body, record.rating, record.votes)?;
        report.loaded += 1;
    }

    tracing::info!(
        "Ingested {} reviews ({} rows skipped, {} malformed)",
        report.loaded,
        report.skipped,
        report.malformed
    );
    Ok(report)
}

/// Build evidence documents from every stored review.
///
/// Each document carries the product, brand, rating, votes, and review
/// body in one normalized (lowercased, whitespace-collapsed) text block,
/// with the structured fields duplicated into metadata for ranking.
pub fn build_evidence(store: &SqliteStore) -> AppResult<Vec<EvidenceItem>> {
    let rows = store.fetch_reviews()?;
    Ok(rows.iter().map(evidence_from_row).collect())
}

fn evidence_from_row(row: &ReviewRow) -> EvidenceItem {
    let rating = row.rating.map(|r| r.to_string()).unwrap_or_default();
    let votes = row.votes.map(|v| v.to_string()).unwrap_or_default();

    let text = normalize_text(&format!(
        "Product: {}\nBrand: {}\nRating: {}\nVotes: {}\nReview: {}",
        row.product, row.brand, rating, votes, row.body
    ));

    EvidenceItem::new(
        text,
        EvidenceMetadata {
            brand: row.brand.clone(),
            product: row.product.clone(),
            rating: row.rating,
            votes: row.votes,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_HEADER: &str = "product_name,brand_name,ratings,reviews,review_votes\n";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_ingest_loads_complete_rows() {
        let csv = format!(
            "{}Galaxy S5,Samsung,5,Great phone,10\nLumia 520,Nokia,4,Good value,2\n",
            CSV_HEADER
        );
        let file = write_csv(&csv);
        let store = SqliteStore::open_in_memory().unwrap();

        let report = ingest_csv(&store, file.path()).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(store.stats().unwrap().reviews, 2);
    }

    #[test]
    fn test_ingest_skips_rows_missing_brand_or_product() {
        let csv = format!(
            "{}Galaxy S5,,5,No brand,1\n,Samsung,4,No product,1\nGalaxy S5,Samsung,5,Complete,3\n",
            CSV_HEADER
        );
        let file = write_csv(&csv);
        let store = SqliteStore::open_in_memory().unwrap();

        let report = ingest_csv(&store, file.path()).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_ingest_tolerates_missing_numeric_fields() {
        let csv = format!("{}Galaxy S5,Samsung,,No numbers here,\n", CSV_HEADER);
        let file = write_csv(&csv);
        let store = SqliteStore::open_in_memory().unwrap();

        let report = ingest_csv(&store, file.path()).unwrap();
        assert_eq!(report.loaded, 1);

        let rows = store.fetch_reviews().unwrap();
        assert_eq!(rows[0].rating, None);
        assert_eq!(rows[0].votes, None);
    }

    #[test]
    fn test_ingest_counts_unparsable_rows_and_keeps_going() {
        let csv = format!(
            "{}Galaxy S5,Samsung,not-a-number,Bad rating,1\nLumia 520,Nokia,4,Fine,2\n",
            CSV_HEADER
        );
        let file = write_csv(&csv);
        let store = SqliteStore::open_in_memory().unwrap();

        let report = ingest_csv(&store, file.path()).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.malformed, 1);
        assert_eq!(store.stats().unwrap().reviews, 1);
    }

    #[test]
    fn test_ingest_missing_file_errors() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(ingest_csv(&store, Path::new("/nonexistent/reviews.csv")).is_err());
    }

    #[test]
    fn test_build_evidence_normalizes_text() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .add_review("Samsung", "Galaxy S5", "Great  Phone!", Some(5.0), Some(10.0))
            .unwrap();

        let evidence = build_evidence(&store).unwrap();
        assert_eq!(evidence.len(), 1);
        assert_eq!(
            evidence[0].text,
            "product: galaxy s5 brand: samsung rating: 5 votes: 10 review: great phone!"
        );
        assert_eq!(evidence[0].metadata.brand, "Samsung");
        assert_eq!(evidence[0].metadata.rating, Some(5.0));
    }

    #[test]
    fn test_build_evidence_absent_numbers_left_blank() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .add_review("Nokia", "Lumia", "fine", None, None)
            .unwrap();

        let evidence = build_evidence(&store).unwrap();
        assert!(evidence[0].text.contains("rating: votes:"));
        assert_eq!(evidence[0].metadata.rating, None);
    }
}
