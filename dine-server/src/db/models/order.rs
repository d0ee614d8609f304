//! Order Model

use super::id_string;
use serde::{Deserialize, Serialize};
use shared::models::{
    CustomizationSelection, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
};
use surrealdb::RecordId;

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing)]
    pub id: Option<RecordId>,
    pub order_number: String,
    /// Table reference ("dining_table:key")
    pub table_id: String,
    pub items: Vec<OrderItemRecord>,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Embedded line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    /// Menu item reference ("menu_item:key")
    pub item_id: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub customizations: Vec<CustomizationSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<OrderItem> for OrderItemRecord {
    fn from(item: OrderItem) -> Self {
        Self {
            item_id: item.item,
            quantity: item.quantity,
            price: item.price,
            customizations: item.customizations,
            notes: item.notes,
        }
    }
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        Self {
            item: record.item_id,
            quantity: record.quantity,
            price: record.price,
            customizations: record.customizations,
            notes: record.notes,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: id_string(&record.id),
            order_number: record.order_number,
            table: record.table_id,
            items: record.items.into_iter().map(OrderItem::from).collect(),
            status: record.status,
            total_amount: record.total_amount,
            payment_status: record.payment_status,
            payment_method: record.payment_method,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
