//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Storage identifier ("category:key")
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub thumbnail_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub thumbnail_url: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub thumbnail_url: Option<String>,
}
