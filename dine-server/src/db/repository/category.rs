//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::CategoryRecord;
use shared::models::Category;
use shared::util::{new_record_key, now_millis};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "category";

/// Thumbnail used when none is supplied
pub const DEFAULT_THUMBNAIL_URL: &str = "https://placehold.co/300x200?text=Category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories in display order
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<CategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) ORDER BY display_order ASC, name ASC")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(categories.into_iter().map(Category::from).collect())
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(None);
        };
        let category: Option<CategoryRecord> = self.base.db().select(thing).await?;
        Ok(category.map(Category::from))
    }

    /// Find category by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let categories: Vec<CategoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE name = $name")
            .bind(("tb", TABLE))
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(categories.into_iter().next().map(Category::from))
    }

    /// Create a new category
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        display_order: i32,
        thumbnail_url: Option<String>,
    ) -> RepoResult<Category> {
        if self.find_by_name(&name).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Category with this name already exists".to_string(),
            ));
        }

        let now = now_millis();
        let record = CategoryRecord {
            id: None,
            name,
            description,
            display_order,
            thumbnail_url: thumbnail_url.unwrap_or_else(|| DEFAULT_THUMBNAIL_URL.to_string()),
            created_at: now,
            updated_at: now,
        };

        let created: Option<CategoryRecord> = self
            .base
            .db()
            .create(RecordId::from_table_key(TABLE, new_record_key()))
            .content(record)
            .await?;
        created
            .map(Category::from)
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(
        &self,
        id: &str,
        name: Option<String>,
        description: Option<String>,
        display_order: Option<i32>,
        thumbnail_url: Option<String>,
    ) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("No category with id: {}", id)))?;

        if let Some(name) = name.as_deref()
            && let Some(found) = self.find_by_name(name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(
                "Category with this name already exists".to_string(),
            ));
        }

        let record = CategoryRecord {
            id: None,
            name: name.unwrap_or(existing.name),
            description: description.or(existing.description),
            display_order: display_order.unwrap_or(existing.display_order),
            thumbnail_url: thumbnail_url.unwrap_or(existing.thumbnail_url),
            created_at: existing.created_at,
            updated_at: now_millis(),
        };

        let thing = record_id(TABLE, &existing.id)
            .ok_or_else(|| RepoError::NotFound(format!("No category with id: {}", id)))?;
        let updated: Option<CategoryRecord> =
            self.base.db().update(thing).content(record).await?;
        updated
            .map(Category::from)
            .ok_or_else(|| RepoError::NotFound(format!("No category with id: {}", id)))
    }

    /// Hard delete a category
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let Some(thing) = record_id(TABLE, id) else {
            return Ok(false);
        };
        let deleted: Option<CategoryRecord> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}
