//! SQLite-backed review store.
//!
//! Holds normalized brand / product / review entities and serves the three
//! fixed structured queries the routing layer depends on. Writes happen
//! only during ingestion; query traffic is read-only.

use crate::routing::{BrandAverage, GraphStore};
use revlens_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

/// A review row joined with its product and brand, as fetched for
/// document-index construction.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub brand: String,
    pub product: String,
    pub body: String,
    pub rating: Option<f64>,
    pub votes: Option<f64>,
}

/// Store-wide row counts, for the stats command.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub brands: u64,
    pub products: u64,
    pub reviews: u64,
}

/// SQLite-backed implementation of the [`GraphStore`] boundary.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| AppError::Store(format!("Failed to open store {:?}: {}", path, e)))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (used by tests).
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Store(format!("Failed to open in-memory store: {}", e)))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> AppResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS brands (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                brand_id INTEGER NOT NULL REFERENCES brands(id),
                UNIQUE(name, brand_id)
            );
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY,
                product_id INTEGER NOT NULL REFERENCES products(id),
                body TEXT NOT NULL,
                rating REAL,
                votes REAL
            );",
        )
        .map_err(|e| AppError::Store(format!("Failed to initialize schema: {}", e)))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Store("Store lock poisoned".to_string()))
    }

    /// Insert a review, creating its brand and product rows as needed.
    pub fn add_review(
        &self,
        brand: &str,
        product: &str,
        body: &str,
        rating: Option<f64>,
        votes: Option<f64>,
    ) -> AppResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT OR IGNORE INTO brands (name) VALUES (?1)",
            params![brand],
        )
        .map_err(|e| AppError::Store(format!("Failed to insert brand: {}", e)))?;

        let brand_id: i64 = conn
            .query_row(
                "SELECT id FROM brands WHERE name = ?1",
                params![brand],
                |row| row.get(0),
            )
            .map_err(|e| AppError::Store(format!("Failed to resolve brand: {}", e)))?;

        conn.execute(
            "INSERT OR IGNORE INTO products (name, brand_id) VALUES (?1, ?2)",
            params![product, brand_id],
        )
        .map_err(|e| AppError::Store(format!("Failed to insert product: {}", e)))?;

        let product_id: i64 = conn
            .query_row(
                "SELECT id FROM products WHERE name = ?1 AND brand_id = ?2",
                params![product, brand_id],
                |row| row.get(0),
            )
            .map_err(|e| AppError::Store(format!("Failed to resolve product: {}", e)))?;

        conn.execute(
            "INSERT INTO reviews (product_id, body, rating, votes) VALUES (?1, ?2, ?3, ?4)",
            params![product_id, body, rating, votes],
        )
        .map_err(|e| AppError::Store(format!("Failed to insert review: {}", e)))?;

        Ok(())
    }

    /// Fetch all reviews joined with product and brand names.
    pub fn fetch_reviews(&self) -> AppResult<Vec<ReviewRow>> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT b.name, p.name, r.body, r.rating, r.votes
                 FROM reviews r
                 JOIN products p ON r.product_id = p.id
                 JOIN brands b ON p.brand_id = b.id
                 ORDER BY r.id",
            )
            .map_err(|e| AppError::Store(format!("Failed to prepare fetch: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ReviewRow {
                    brand: row.get(0)?,
                    product: row.get(1)?,
                    body: row.get(2)?,
                    rating: row.get(3)?,
                    votes: row.get(4)?,
                })
            })
            .map_err(|e| AppError::Store(format!("Failed to fetch reviews: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Failed to read review row: {}", e)))
    }

    /// Row counts across all tables.
    pub fn stats(&self) -> AppResult<StoreStats> {
        let conn = self.lock()?;

        let count = |sql: &str| -> AppResult<u64> {
            conn.query_row(sql, [], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
                .map_err(|e| AppError::Store(format!("Failed to count rows: {}", e)))
        };

        Ok(StoreStats {
            brands: count("SELECT COUNT(*) FROM brands")?,
            products: count("SELECT COUNT(*) FROM products")?,
            reviews: count("SELECT COUNT(*) FROM reviews")?,
        })
    }
}

impl GraphStore for SqliteStore {
    fn count_brands(&self) -> AppResult<u64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(DISTINCT name) FROM brands", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as u64)
        .map_err(|e| AppError::Store(format!("Failed to count brands: {}", e)))
    }

    fn list_brands(&self) -> AppResult<Vec<String>> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare("SELECT DISTINCT name FROM brands ORDER BY name")
            .map_err(|e| AppError::Store(format!("Failed to prepare brand list: {}", e)))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| AppError::Store(format!("Failed to list brands: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Failed to read brand row: {}", e)))
    }

    fn brand_rating_averages(&self) -> AppResult<Vec<BrandAverage>> {
        let conn = self.lock()?;

        let mut stmt = conn
            .prepare(
                "SELECT b.name, ROUND(AVG(r.rating), 2) AS avg_rating
                 FROM reviews r
                 JOIN products p ON r.product_id = p.id
                 JOIN brands b ON p.brand_id = b.id
                 WHERE r.rating IS NOT NULL
                 GROUP BY b.name
                 ORDER BY avg_rating DESC",
            )
            .map_err(|e| AppError::Store(format!("Failed to prepare aggregation: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(BrandAverage {
                    brand: row.get(0)?,
                    avg_rating: row.get(1)?,
                })
            })
            .map_err(|e| AppError::Store(format!("Failed to aggregate ratings: {}", e)))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::Store(format!("Failed to read aggregation row: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .add_review("Samsung", "Galaxy S5", "great phone", Some(5.0), Some(10.0))
            .unwrap();
        store
            .add_review("Samsung", "Galaxy S5", "battery drains", Some(3.0), Some(2.0))
            .unwrap();
        store
            .add_review("Nokia", "Lumia 520", "solid budget pick", Some(4.0), None)
            .unwrap();
        store
    }

    #[test]
    fn test_count_brands_is_distinct() {
        let store = seeded_store();
        assert_eq!(store.count_brands().unwrap(), 2);
    }

    #[test]
    fn test_list_brands_sorted() {
        let store = seeded_store();
        assert_eq!(
            store.list_brands().unwrap(),
            vec!["Nokia".to_string(), "Samsung".to_string()]
        );
    }

    #[test]
    fn test_brand_averages_rounded_and_descending() {
        let store = seeded_store();
        let averages = store.brand_rating_averages().unwrap();

        assert_eq!(averages.len(), 2);
        // Samsung: (5 + 3) / 2 = 4.0; Nokia: 4.0 — equal averages are
        // allowed in either order, so just check rounding and ordering.
        assert!(averages[0].avg_rating >= averages[1].avg_rating);
        for row in &averages {
            assert_eq!(row.avg_rating, 4.0);
        }
    }

    #[test]
    fn test_brand_averages_rounding() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .add_review("Acme", "Widget", "ok", Some(5.0), None)
            .unwrap();
        store
            .add_review("Acme", "Widget", "meh", Some(4.0), None)
            .unwrap();
        store
            .add_review("Acme", "Widget", "bad", Some(2.0), None)
            .unwrap();

        let averages = store.brand_rating_averages().unwrap();
        // (5 + 4 + 2) / 3 = 3.666... → 3.67
        assert_eq!(averages[0].avg_rating, 3.67);
    }

    #[test]
    fn test_unrated_reviews_excluded_from_average() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .add_review("Acme", "Widget", "no rating", None, Some(3.0))
            .unwrap();
        store
            .add_review("Acme", "Widget", "rated", Some(4.0), None)
            .unwrap();

        let averages = store.brand_rating_averages().unwrap();
        assert_eq!(averages[0].avg_rating, 4.0);
    }

    #[test]
    fn test_fetch_reviews_round_trip() {
        let store = seeded_store();
        let rows = store.fetch_reviews().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].brand, "Samsung");
        assert_eq!(rows[0].product, "Galaxy S5");
        assert_eq!(rows[0].rating, Some(5.0));
        assert_eq!(rows[2].votes, None);
    }

    #[test]
    fn test_stats() {
        let store = seeded_store();
        let stats = store.stats().unwrap();
        assert_eq!(stats.brands, 2);
        assert_eq!(stats.products, 2);
        assert_eq!(stats.reviews, 3);
    }

    #[test]
    fn test_empty_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.count_brands().unwrap(), 0);
        assert!(store.list_brands().unwrap().is_empty());
        assert!(store.brand_rating_averages().unwrap().is_empty());
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .add_review("Acme", "Widget", "persisted", Some(4.0), None)
                .unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.stats().unwrap().reviews, 1);
    }
}
