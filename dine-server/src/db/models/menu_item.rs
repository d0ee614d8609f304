//! Menu Item Model

use super::id_string;
use serde::{Deserialize, Serialize};
use shared::models::{CustomizationGroup, MenuItem};
use surrealdb::RecordId;

/// Menu item document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Category reference ("category:key")
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub customization_options: Vec<CustomizationGroup>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl From<MenuItemRecord> for MenuItem {
    fn from(record: MenuItemRecord) -> Self {
        Self {
            id: id_string(&record.id),
            name: record.name,
            description: record.description,
            price: record.price,
            category: record.category,
            image_url: record.image_url,
            customization_options: record.customization_options,
            is_available: record.is_available,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
