//! Category Model

use super::id_string;
use serde::{Deserialize, Serialize};
use shared::models::Category;
use surrealdb::RecordId;

/// Category document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub thumbnail_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: id_string(&record.id),
            name: record.name,
            description: record.description,
            display_order: record.display_order,
            thumbnail_url: record.thumbnail_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
