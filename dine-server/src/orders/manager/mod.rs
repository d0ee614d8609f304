//! OrdersManager - order lifecycle and table occupancy
//!
//! This module handles:
//! - Payload validation (before any write)
//! - Order number allocation
//! - Order persistence
//! - The table side effect of each lifecycle step
//! - Read views with table and menu items resolved
//!
//! # Lifecycle Flow
//!
//! ```text
//! create_order(payload)
//!     ├─ 1. Validate payload
//!     ├─ 2. Resolve table (must exist)
//!     ├─ 3. Resolve menu items (must exist and be available)
//!     ├─ 4. Allocate order number (verified against the store)
//!     ├─ 5. Write order (status = pending)
//!     └─ 6. Occupy table with the new order
//!
//! update_order_status(id, status)
//!     ├─ 1. Parse status
//!     ├─ 2. Write status
//!     └─ 3. complete → release table (no other status touches it)
//!
//! delete_order(id)
//!     ├─ 1. Delete order
//!     └─ 2. Release table (best effort, whatever the status was)
//! ```
//!
//! Order and table writes are separate documents with no transaction
//! between them. Concurrent creates on one table are last-writer-wins on
//! `current_order`.

mod error;
pub use error::*;

use super::traits::{MenuCatalog, OrderStore, TableRegistry};
use super::validation;
use crate::db::models::{OrderItemRecord, OrderRecord};
use crate::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderFilter, OrderRepository, dining_table,
    menu_item, record_id,
};
use shared::models::{
    DiningTable, MenuItem, Order, OrderCreate, OrderDetail, OrderItem, OrderItemDetail,
    OrderStatus, OrderStatusUpdate, OrderUpdate, PaymentStatus,
};
use shared::util::{generate_order_number, new_record_key, now_millis};
use std::collections::HashMap;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Attempts at finding an unused order number
const ORDER_NUMBER_ATTEMPTS: u32 = 5;

/// OrdersManager for the order lifecycle
#[derive(Clone)]
pub struct OrdersManager {
    orders: Arc<dyn OrderStore>,
    tables: Arc<dyn TableRegistry>,
    menu: Arc<dyn MenuCatalog>,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("orders", &"<OrderStore>")
            .field("tables", &"<TableRegistry>")
            .field("menu", &"<MenuCatalog>")
            .finish()
    }
}

impl OrdersManager {
    /// Create a manager backed by the repositories on `db`
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: Arc::new(OrderRepository::new(db.clone())),
            tables: Arc::new(DiningTableRepository::new(db.clone())),
            menu: Arc::new(MenuItemRepository::new(db)),
        }
    }

    /// Create a manager from explicit stores
    pub fn with_stores(
        orders: Arc<dyn OrderStore>,
        tables: Arc<dyn TableRegistry>,
        menu: Arc<dyn MenuCatalog>,
    ) -> Self {
        Self {
            orders,
            tables,
            menu,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an order and occupy its table
    pub async fn create_order(&self, payload: OrderCreate) -> ManagerResult<Order> {
        let mut input = validation::validate_create(payload)?;

        let table = self
            .tables
            .find(&input.table)
            .await?
            .ok_or_else(|| ManagerError::TableNotFound(input.table.clone()))?;

        self.check_menu_items(&mut input.items).await?;

        if validation::total_mismatch(&input.items, input.total_amount) {
            tracing::warn!(
                table_id = %table.id,
                total_amount = input.total_amount,
                items_total = validation::items_total(&input.items),
                "Order total does not match line items, storing supplied total"
            );
        }

        let order_number = self.allocate_order_number().await?;
        let now = now_millis();
        let record = OrderRecord {
            id: None,
            order_number,
            table_id: table.id.clone(),
            items: input.items.into_iter().map(OrderItemRecord::from).collect(),
            status: OrderStatus::Pending,
            total_amount: input.total_amount,
            payment_status: PaymentStatus::default(),
            payment_method: input.payment_method,
            created_at: now,
            updated_at: now,
        };

        let order = self.orders.insert(&new_record_key(), record).await?;
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            table_id = %order.table,
            status = %order.status,
            "Order created"
        );

        match self.tables.occupy(&order.table, &order.id).await {
            Ok(true) => {
                tracing::info!(table_id = %order.table, order_id = %order.id, "Table occupied");
            }
            Ok(false) => {
                tracing::warn!(
                    table_id = %order.table,
                    order_id = %order.id,
                    "Table disappeared before it could be occupied"
                );
            }
            Err(e) => {
                tracing::error!(
                    table_id = %order.table,
                    order_id = %order.id,
                    error = %e,
                    "Failed to occupy table, order is persisted without an occupied table"
                );
                return Err(e.into());
            }
        }

        Ok(order)
    }

    /// Set an order's status. Only `complete` releases the table.
    pub async fn update_order_status(
        &self,
        id: &str,
        payload: OrderStatusUpdate,
    ) -> ManagerResult<OrderDetail> {
        let status = validation::parse_status(payload.status.as_deref())?;

        let order = self
            .orders
            .set_status(id, status)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(id.to_string()))?;
        tracing::info!(
            order_id = %order.id,
            table_id = %order.table,
            status = %status,
            "Order status updated"
        );

        if status.releases_table() {
            match self.tables.release(&order.table).await {
                Ok(true) => {
                    tracing::info!(table_id = %order.table, order_id = %order.id, "Table released");
                }
                Ok(false) => {
                    tracing::warn!(
                        table_id = %order.table,
                        order_id = %order.id,
                        "Completed order references a missing table"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        table_id = %order.table,
                        order_id = %order.id,
                        error = %e,
                        "Failed to release table, order is complete but table stays occupied"
                    );
                    return Err(e.into());
                }
            }
        }

        self.resolve(order, &mut HashMap::new()).await
    }

    /// Replace line items and/or total. The table is never touched.
    /// Menu items are not looked up; each line keeps its own price.
    pub async fn update_order(&self, id: &str, payload: OrderUpdate) -> ManagerResult<OrderDetail> {
        let mut items = payload
            .items
            .map(validation::validate_items)
            .transpose()?;
        let total_amount = payload
            .total_amount
            .map(validation::validate_total)
            .transpose()?;

        if let Some(items) = items.as_mut() {
            canonical_item_refs(items)?;
        }

        let order = self
            .orders
            .set_contents(id, items, total_amount)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(id.to_string()))?;
        tracing::info!(
            order_id = %order.id,
            table_id = %order.table,
            status = %order.status,
            "Order contents updated"
        );

        if validation::total_mismatch(&order.items, order.total_amount) {
            tracing::warn!(
                order_id = %order.id,
                total_amount = order.total_amount,
                items_total = validation::items_total(&order.items),
                "Order total does not match line items"
            );
        }

        self.resolve(order, &mut HashMap::new()).await
    }

    /// Delete an order and release its table whatever its status
    pub async fn delete_order(&self, id: &str) -> ManagerResult<Order> {
        let order = self
            .orders
            .remove(id)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(id.to_string()))?;
        tracing::info!(
            order_id = %order.id,
            table_id = %order.table,
            status = %order.status,
            "Order deleted"
        );

        // The delete stands even if the release does not.
        match self.tables.release(&order.table).await {
            Ok(true) => {
                tracing::info!(table_id = %order.table, order_id = %order.id, "Table released");
            }
            Ok(false) => {
                tracing::warn!(
                    table_id = %order.table,
                    order_id = %order.id,
                    "Deleted order referenced a missing table"
                );
            }
            Err(e) => {
                tracing::warn!(
                    table_id = %order.table,
                    order_id = %order.id,
                    error = %e,
                    "Failed to release table after order delete"
                );
            }
        }

        Ok(order)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All orders, newest first
    pub async fn get_all_orders(&self) -> ManagerResult<Vec<OrderDetail>> {
        self.list(&OrderFilter::All).await
    }

    pub async fn get_order(&self, id: &str) -> ManagerResult<OrderDetail> {
        let order = self
            .orders
            .find(id)
            .await?
            .ok_or_else(|| ManagerError::OrderNotFound(id.to_string()))?;
        self.resolve(order, &mut HashMap::new()).await
    }

    /// Orders placed on a table ("dining_table:key" or bare key)
    pub async fn get_orders_by_table(&self, table_id: &str) -> ManagerResult<Vec<OrderDetail>> {
        match record_id(dining_table::TABLE, table_id) {
            Some(table) => self.list(&OrderFilter::Table(table.to_string())).await,
            None => Ok(Vec::new()),
        }
    }

    /// Orders in a status; an unknown status matches nothing
    pub async fn get_orders_by_status(&self, status: &str) -> ManagerResult<Vec<OrderDetail>> {
        match status.parse::<OrderStatus>() {
            Ok(status) => self.list(&OrderFilter::Status(status)).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn list(&self, filter: &OrderFilter) -> ManagerResult<Vec<OrderDetail>> {
        let orders = self.orders.list(filter).await?;
        let mut menu_cache = HashMap::new();
        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.resolve(order, &mut menu_cache).await?);
        }
        Ok(details)
    }

    /// Resolve table and menu items for display. Missing references
    /// resolve to `None`.
    async fn resolve(
        &self,
        order: Order,
        menu_cache: &mut HashMap<String, Option<MenuItem>>,
    ) -> ManagerResult<OrderDetail> {
        let table: Option<DiningTable> = self.tables.find(&order.table).await?;

        let mut items = Vec::with_capacity(order.items.len());
        for line in order.items {
            let item = match menu_cache.get(&line.item) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.menu.find_item(&line.item).await?;
                    menu_cache.insert(line.item.clone(), found.clone());
                    found
                }
            };
            items.push(OrderItemDetail {
                item_id: line.item,
                item,
                quantity: line.quantity,
                price: line.price,
                customizations: line.customizations,
                notes: line.notes,
            });
        }

        Ok(OrderDetail {
            id: order.id,
            order_number: order.order_number,
            table_id: order.table,
            table,
            items,
            status: order.status,
            total_amount: order.total_amount,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }

    /// Every referenced menu item must exist and be available. References
    /// are rewritten to the canonical "menu_item:key" form.
    async fn check_menu_items(&self, items: &mut [OrderItem]) -> ManagerResult<()> {
        for line in items.iter_mut() {
            let item = self
                .menu
                .find_item(&line.item)
                .await?
                .ok_or_else(|| ManagerError::MenuItemNotFound(line.item.clone()))?;
            if !item.is_available {
                return Err(ManagerError::MenuItemUnavailable(item.id));
            }
            line.item = item.id;
        }
        Ok(())
    }

    /// Generate order numbers until one is unused in the store
    async fn allocate_order_number(&self) -> ManagerResult<String> {
        for attempt in 1..=ORDER_NUMBER_ATTEMPTS {
            let candidate = generate_order_number(now_millis());
            if !self.orders.order_number_exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(attempt, order_number = %candidate, "Order number collision, retrying");
        }
        Err(ManagerError::OrderNumberExhausted(ORDER_NUMBER_ATTEMPTS))
    }
}

/// Rewrite line item references to the canonical "menu_item:key" form
fn canonical_item_refs(items: &mut [OrderItem]) -> ManagerResult<()> {
    for line in items.iter_mut() {
        let id = record_id(menu_item::TABLE, &line.item)
            .ok_or_else(|| ManagerError::MenuItemNotFound(line.item.clone()))?;
        line.item = id.to_string();
    }
    Ok(())
}

#[cfg(test)]
mod tests;
