//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::MenuItemRecord;
use shared::models::{MenuItem, MenuItemUpdate};
use shared::util::{new_record_key, now_millis};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "menu_item";

/// Image used when none is supplied
pub const DEFAULT_IMAGE_URL: &str = "https://placehold.co/600x400?text=Menu+Item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items by name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItemRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) ORDER BY name ASC")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(items.into_iter().map(MenuItem::from).collect())
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let item: Option<MenuItemRecord> = self.base.db().select(thing).await?;
        Ok(item.map(MenuItem::from))
    }

    /// Find all items of a category ("category:key")
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItemRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE category = $category ORDER BY name ASC")
            .bind(("tb", TABLE))
            .bind(("category", category_id.to_string()))
            .await?
            .take(0)?;
        Ok(items.into_iter().map(MenuItem::from).collect())
    }

    /// Create a new menu item; `record.id` is ignored
    pub async fn create(&self, mut record: MenuItemRecord) -> RepoResult<MenuItem> {
        let now = now_millis();
        record.id = None;
        record.created_at = now;
        record.updated_at = now;
        if record.image_url.trim().is_empty() {
            record.image_url = DEFAULT_IMAGE_URL.to_string();
        }

        let created: Option<MenuItemRecord> = self
            .base
            .db()
            .create(RecordId::from_table_key(TABLE, new_record_key()))
            .content(record)
            .await?;
        created
            .map(MenuItem::from)
            .ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item; `category` must already be a resolved reference
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("No menu item with id: {}", id)))?;

        let record = MenuItemRecord {
            id: None,
            name: data.name.unwrap_or(existing.name),
            description: data.description.unwrap_or(existing.description),
            price: data.price.unwrap_or(existing.price),
            category: data.category.unwrap_or(existing.category),
            image_url: data.image_url.unwrap_or(existing.image_url),
            customization_options: data
                .customization_options
                .unwrap_or(existing.customization_options),
            is_available: data.is_available.unwrap_or(existing.is_available),
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let thing = record_id(TABLE, &existing.id)
            .ok_or_else(|| RepoError::NotFound(format!("No menu item with id: {}", id)))?;
        let updated: Option<MenuItemRecord> =
            self.base.db().update(thing).content(record).await?;
        updated
            .map(MenuItem::from)
            .ok_or_else(|| RepoError::NotFound(format!("No menu item with id: {}", id)))
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(false);
        };
        let deleted: Option<MenuItemRecord> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}
