//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Selectable option inside a customization group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationOption {
    pub name: String,
    #[serde(default)]
    pub price_addition: f64,
}

/// Named group of options (e.g. "Size" → Small / Large)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationGroup {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CustomizationOption>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Storage identifier ("menu_item:key")
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Category reference ("category:key")
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub customization_options: Vec<CustomizationGroup>,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub customization_options: Option<Vec<CustomizationGroup>>,
    pub is_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub customization_options: Option<Vec<CustomizationGroup>>,
    pub is_available: Option<bool>,
}
