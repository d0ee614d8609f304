//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Table occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
///
/// `current_order` is set while an active order targets the table. The
/// order lifecycle keeps it in step with the order; nothing in storage
/// enforces that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    /// Storage identifier ("dining_table:key")
    pub id: String,
    /// Human-facing table number (e.g. "12", "A3")
    pub table_number: String,
    pub capacity: i32,
    pub status: TableStatus,
    /// Order reference ("orders:key")
    pub current_order: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub table_number: Option<String>,
    pub capacity: Option<i32>,
    pub status: Option<TableStatus>,
}
