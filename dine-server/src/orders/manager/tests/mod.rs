use super::*;
use crate::db::DbService;
use crate::db::models::MenuItemRecord;
use crate::db::repository::{CategoryRepository, RepoError, RepoResult};
use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::{OrderItemInput, TableStatus};

async fn test_db() -> Surreal<Db> {
    DbService::memory().await.unwrap().db
}

async fn create_test_manager() -> (OrdersManager, Surreal<Db>) {
    let db = test_db().await;
    (OrdersManager::new(db.clone()), db)
}

async fn seed_table(db: &Surreal<Db>, number: &str, capacity: i32) -> DiningTable {
    DiningTableRepository::new(db.clone())
        .create(number.to_string(), capacity, TableStatus::Available)
        .await
        .unwrap()
}

async fn seed_menu_item(db: &Surreal<Db>, name: &str, price: f64, available: bool) -> MenuItem {
    let categories = CategoryRepository::new(db.clone());
    let category = match categories.find_by_name("Mains").await.unwrap() {
        Some(category) => category,
        None => categories
            .create("Mains".to_string(), None, 0, None)
            .await
            .unwrap(),
    };
    MenuItemRepository::new(db.clone())
        .create(MenuItemRecord {
            id: None,
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            category: category.id,
            image_url: String::new(),
            customization_options: vec![],
            is_available: available,
            created_at: 0,
            updated_at: 0,
        })
        .await
        .unwrap()
}

async fn load_table(db: &Surreal<Db>, id: &str) -> DiningTable {
    DiningTableRepository::new(db.clone())
        .find_by_id(id)
        .await
        .unwrap()
        .expect("table should exist")
}

fn line(item_id: &str, quantity: i32, price: f64) -> OrderItemInput {
    OrderItemInput {
        item: Some(item_id.to_string()),
        quantity: Some(quantity),
        price: Some(price),
        customizations: None,
        notes: None,
    }
}

fn create_payload(table_id: &str, items: Vec<OrderItemInput>, total: f64) -> OrderCreate {
    OrderCreate {
        table: Some(table_id.to_string()),
        items: Some(items),
        total_amount: Some(total),
        payment_method: None,
    }
}

fn status_payload(status: &str) -> OrderStatusUpdate {
    OrderStatusUpdate {
        status: Some(status.to_string()),
    }
}

fn validation_code(err: ManagerError) -> ErrorCode {
    match err {
        ManagerError::Validation(code, _) => code,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ========================================================================
// Table registry that fails on demand
// ========================================================================

/// Wraps the real registry and fails `occupy` / `release` when asked to
struct FlakyTables {
    inner: DiningTableRepository,
    fail_occupy: bool,
    fail_release: bool,
}

#[async_trait]
impl TableRegistry for FlakyTables {
    async fn find(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        self.inner.find_by_id(id).await
    }

    async fn occupy(&self, table_id: &str, order_id: &str) -> RepoResult<bool> {
        if self.fail_occupy {
            return Err(RepoError::Database("simulated table write failure".into()));
        }
        self.inner.occupy(table_id, order_id).await
    }

    async fn release(&self, table_id: &str) -> RepoResult<bool> {
        if self.fail_release {
            return Err(RepoError::Database("simulated table write failure".into()));
        }
        self.inner.release(table_id).await
    }
}

fn manager_with_flaky_tables(db: &Surreal<Db>, fail_occupy: bool, fail_release: bool) -> OrdersManager {
    OrdersManager::with_stores(
        Arc::new(OrderRepository::new(db.clone())),
        Arc::new(FlakyTables {
            inner: DiningTableRepository::new(db.clone()),
            fail_occupy,
            fail_release,
        }),
        Arc::new(MenuItemRepository::new(db.clone())),
    )
}

mod test_core;
mod test_flows;
