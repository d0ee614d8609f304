//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB document tables.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::{OrderFilter, OrderRepository};

use shared::error::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:key" everywhere
// =============================================================================
//
// Public ids are `RecordId` display strings ("orders:k3j...").
// A bare key is accepted and qualified with the expected table; an id for a
// different table never resolves.

/// Resolve a caller-supplied id against `table`.
///
/// Returns `None` when the id is blank or names another table.
pub fn record_id(table: &str, raw: &str) -> Option<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.split_once(':') {
        Some((tb, key)) if tb == table && !key.is_empty() => {
            Some(RecordId::from_table_key(table, unescape_key(key)))
        }
        Some(_) => None,
        None => Some(RecordId::from_table_key(table, raw)),
    }
}

// Keys that needed escaping are rendered as ⟨key⟩
fn unescape_key(key: &str) -> &str {
    key.strip_prefix('⟨')
        .and_then(|k| k.strip_suffix('⟩'))
        .unwrap_or(key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
