//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::DiningTableRecord;
use shared::models::{DiningTable, TableStatus};
use shared::util::{new_record_key, now_millis};
use std::cmp::Ordering;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables ordered by number ("2" before "10", numbers before "A3")
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTableRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb)")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        let mut tables: Vec<DiningTable> = tables.into_iter().map(DiningTable::from).collect();
        tables.sort_by(|a, b| compare_table_numbers(&a.table_number, &b.table_number));
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let table: Option<DiningTableRecord> = self.base.db().select(thing).await?;
        Ok(table.map(DiningTable::from))
    }

    /// Find table by its human-facing number
    pub async fn find_by_number(&self, table_number: &str) -> RepoResult<Option<DiningTable>> {
        let tables: Vec<DiningTableRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE table_number = $number")
            .bind(("tb", TABLE))
            .bind(("number", table_number.to_string()))
            .await?
            .take(0)?;
        Ok(tables.into_iter().next().map(DiningTable::from))
    }

    /// Create a new dining table
    pub async fn create(
        &self,
        table_number: String,
        capacity: i32,
        status: TableStatus,
    ) -> RepoResult<DiningTable> {
        if self.find_by_number(&table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table {} already exists",
                table_number
            )));
        }

        let now = now_millis();
        let record = DiningTableRecord {
            id: None,
            table_number,
            capacity,
            status,
            current_order: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DiningTableRecord> = self
            .base
            .db()
            .create(RecordId::from_table_key(TABLE, new_record_key()))
            .content(record)
            .await?;
        created
            .map(DiningTable::from)
            .ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update number, capacity or status of a table
    pub async fn update(
        &self,
        id: &str,
        table_number: Option<String>,
        capacity: Option<i32>,
        status: Option<TableStatus>,
    ) -> RepoResult<DiningTable> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("No table with id: {}", id)))?;

        if let Some(number) = table_number.as_deref()
            && number != existing.table_number
            && self.find_by_number(number).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!("Table {} already exists", number)));
        }

        let record = DiningTableRecord {
            id: None,
            table_number: table_number.unwrap_or(existing.table_number),
            capacity: capacity.unwrap_or(existing.capacity),
            status: status.unwrap_or(existing.status),
            current_order: existing.current_order,
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let thing = record_id(TABLE, &existing.id)
            .ok_or_else(|| RepoError::NotFound(format!("No table with id: {}", id)))?;
        let updated: Option<DiningTableRecord> =
            self.base.db().update(thing).content(record).await?;
        updated
            .map(DiningTable::from)
            .ok_or_else(|| RepoError::NotFound(format!("No table with id: {}", id)))
    }

    /// Hard delete a table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(false);
        };
        let deleted: Option<DiningTableRecord> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }

    /// Mark the table occupied by `order_id`; `false` when the table is missing
    pub async fn occupy(&self, id: &str, order_id: &str) -> RepoResult<bool> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(false);
        };
        let updated: Vec<DiningTableRecord> = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = 'occupied', current_order = $order, updated_at = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("order", order_id.to_string()))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }

    /// Mark the table available and clear its order; `false` when the table is missing
    pub async fn release(&self, id: &str) -> RepoResult<bool> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(false);
        };
        let updated: Vec<DiningTableRecord> = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = 'available', current_order = NONE, updated_at = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }
}

/// Numeric table numbers sort by value and come first; the rest sort as text
pub fn compare_table_numbers(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
