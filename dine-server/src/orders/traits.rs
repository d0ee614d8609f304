//! Storage seams used by the orders manager
//!
//! The repositories implement these directly; tests wrap them to inject
//! failures into a single step of a lifecycle operation.

use async_trait::async_trait;
use shared::models::{DiningTable, MenuItem, Order, OrderItem, OrderStatus};

use crate::db::models::{OrderItemRecord, OrderRecord};
use crate::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderFilter, OrderRepository, RepoResult,
};

/// Order documents
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, key: &str, record: OrderRecord) -> RepoResult<Order>;

    async fn find(&self, id: &str) -> RepoResult<Option<Order>>;

    async fn list(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>>;

    async fn order_number_exists(&self, order_number: &str) -> RepoResult<bool>;

    /// `None` when the order does not exist
    async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<Option<Order>>;

    /// `None` when the order does not exist
    async fn set_contents(
        &self,
        id: &str,
        items: Option<Vec<OrderItem>>,
        total_amount: Option<f64>,
    ) -> RepoResult<Option<Order>>;

    /// Returns the removed order, `None` when it did not exist
    async fn remove(&self, id: &str) -> RepoResult<Option<Order>>;
}

/// Dining tables as seen by the order lifecycle
#[async_trait]
pub trait TableRegistry: Send + Sync {
    async fn find(&self, id: &str) -> RepoResult<Option<DiningTable>>;

    /// Mark occupied by `order_id`. `false` when the table does not exist.
    async fn occupy(&self, table_id: &str, order_id: &str) -> RepoResult<bool>;

    /// Mark available and clear the order. `false` when the table does not exist.
    async fn release(&self, table_id: &str) -> RepoResult<bool>;
}

/// Read-only menu lookups
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn find_item(&self, id: &str) -> RepoResult<Option<MenuItem>>;
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert(&self, key: &str, record: OrderRecord) -> RepoResult<Order> {
        self.create(key, record).await
    }

    async fn find(&self, id: &str) -> RepoResult<Option<Order>> {
        self.find_by_id(id).await
    }

    async fn list(&self, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        self.find_all(filter).await
    }

    async fn order_number_exists(&self, order_number: &str) -> RepoResult<bool> {
        OrderRepository::order_number_exists(self, order_number).await
    }

    async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<Option<Order>> {
        self.update_status(id, status).await
    }

    async fn set_contents(
        &self,
        id: &str,
        items: Option<Vec<OrderItem>>,
        total_amount: Option<f64>,
    ) -> RepoResult<Option<Order>> {
        let items = items.map(|items| items.into_iter().map(OrderItemRecord::from).collect());
        self.update_contents(id, items, total_amount).await
    }

    async fn remove(&self, id: &str) -> RepoResult<Option<Order>> {
        self.delete(id).await
    }
}

#[async_trait]
impl TableRegistry for DiningTableRepository {
    async fn find(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        self.find_by_id(id).await
    }

    async fn occupy(&self, table_id: &str, order_id: &str) -> RepoResult<bool> {
        DiningTableRepository::occupy(self, table_id, order_id).await
    }

    async fn release(&self, table_id: &str) -> RepoResult<bool> {
        DiningTableRepository::release(self, table_id).await
    }
}

#[async_trait]
impl MenuCatalog for MenuItemRepository {
    async fn find_item(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        self.find_by_id(id).await
    }
}
