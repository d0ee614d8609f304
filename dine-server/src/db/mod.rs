//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk for the server, in-memory for tests.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "dine";
const DATABASE: &str = "main";

/// Table and index definitions, applied on every start.
///
/// Tables stay schemaless; uniqueness of the human-facing numbers and names
/// is backed by indexes on top of the repository checks.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS orders SCHEMALESS;
DEFINE INDEX IF NOT EXISTS orders_number_idx ON TABLE orders FIELDS order_number UNIQUE;
DEFINE INDEX IF NOT EXISTS orders_table_idx ON TABLE orders FIELDS table_id;
DEFINE INDEX IF NOT EXISTS orders_status_idx ON TABLE orders FIELDS status;

DEFINE TABLE IF NOT EXISTS dining_table SCHEMALESS;
DEFINE INDEX IF NOT EXISTS dining_table_number_idx ON TABLE dining_table FIELDS table_number UNIQUE;

DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS category_name_idx ON TABLE category FIELDS name UNIQUE;

DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
DEFINE INDEX IF NOT EXISTS menu_item_category_idx ON TABLE menu_item FIELDS category;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!(path = %db_path, "Database connection established (RocksDB)");
        Self::prepare(db).await
    }

    /// Open an in-memory database
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
