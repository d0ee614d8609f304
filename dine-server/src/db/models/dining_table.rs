//! Dining Table Model

use super::id_string;
use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, TableStatus};
use surrealdb::RecordId;

/// Dining table document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<RecordId>,
    pub table_number: String,
    pub capacity: i32,
    #[serde(default)]
    pub status: TableStatus,
    /// Order reference ("orders:key")
    #[serde(default)]
    pub current_order: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<DiningTableRecord> for DiningTable {
    fn from(record: DiningTableRecord) -> Self {
        Self {
            id: id_string(&record.id),
            table_number: record.table_number,
            capacity: record.capacity,
            status: record.status,
            current_order: record.current_order,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
