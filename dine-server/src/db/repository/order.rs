//! Order Repository
//!
//! Single-document reads and writes on the `orders` table. Cross-document
//! effects (table occupancy) belong to the orders manager.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{OrderItemRecord, OrderRecord};
use serde::Serialize;
use shared::models::{Order, OrderStatus};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "orders";

/// Listing filter, exact match only
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    All,
    /// Table reference ("dining_table:key")
    Table(String),
    Status(OrderStatus),
}

#[derive(Debug, Serialize)]
struct ContentsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<OrderItemRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_amount: Option<f64>,
    updated_at: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List orders newest first
    pub async fn find_all(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        let db = self.base.db();
        let orders: Vec<OrderRecord> = match filter {
            OrderFilter::All => {
                db.query("SELECT * FROM type::table($tb) ORDER BY created_at DESC")
                    .bind(("tb", TABLE))
                    .await?
                    .take(0)?
            }
            OrderFilter::Table(table_id) => {
                db.query(
                    "SELECT * FROM type::table($tb) WHERE table_id = $table ORDER BY created_at DESC",
                )
                .bind(("tb", TABLE))
                .bind(("table", table_id.clone()))
                .await?
                .take(0)?
            }
            OrderFilter::Status(status) => {
                db.query(
                    "SELECT * FROM type::table($tb) WHERE status = $status ORDER BY created_at DESC",
                )
                .bind(("tb", TABLE))
                .bind(("status", status.as_str()))
                .await?
                .take(0)?
            }
        };
        Ok(orders.into_iter().map(Order::from).collect())
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let order: Option<OrderRecord> = self.base.db().select(thing).await?;
        Ok(order.map(Order::from))
    }

    /// Check whether an order number is already taken
    pub async fn order_number_exists(&self, order_number: &str) -> RepoResult<bool> {
        let numbers: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE order_number FROM type::table($tb) WHERE order_number = $number")
            .bind(("tb", TABLE))
            .bind(("number", order_number.to_string()))
            .await?
            .take(0)?;
        Ok(!numbers.is_empty())
    }

    /// Create an order under the given record key
    pub async fn create(&self, key: &str, record: OrderRecord) -> RepoResult<Order> {
        let created: Option<OrderRecord> = self
            .base
            .db()
            .create(RecordId::from_table_key(TABLE, key))
            .content(record)
            .await?;
        created
            .map(Order::from)
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Set the status; `None` when the order does not exist
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Option<Order>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let updated: Vec<OrderRecord> = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status.as_str()))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next().map(Order::from))
    }

    /// Replace whichever of items / total were supplied
    pub async fn update_contents(
        &self,
        id: &str,
        items: Option<Vec<OrderItemRecord>>,
        total_amount: Option<f64>,
    ) -> RepoResult<Option<Order>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let patch = ContentsPatch {
            items,
            total_amount,
            updated_at: now_millis(),
        };
        let updated: Vec<OrderRecord> = self
            .base
            .db()
            .query("UPDATE $thing MERGE $patch RETURN AFTER")
            .bind(("thing", thing))
            .bind(("patch", patch))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next().map(Order::from))
    }

    /// Hard delete, returning the removed order
    pub async fn delete(&self, id: &str) -> RepoResult<Option<Order>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let deleted: Option<OrderRecord> = self.base.db().delete(thing).await?;
        Ok(deleted.map(Order::from))
    }
}
