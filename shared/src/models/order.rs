//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DiningTable, MenuItem};

/// Order status
///
/// No transition table is enforced: any member may follow any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
    Complete,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Served,
        OrderStatus::Complete,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Served => "served",
            OrderStatus::Complete => "complete",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether moving an order into this status frees its table.
    ///
    /// Only `complete` does; `cancelled` keeps the table occupied.
    pub fn releases_table(&self) -> bool {
        matches!(self, OrderStatus::Complete)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not an order status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOrderStatus(pub String);

impl fmt::Display for UnknownOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownOrderStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

/// Payment status (carried, not enforced)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// Payment method (carried, not enforced)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    #[default]
    NotPaid,
}

/// Customization chosen for a line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomizationSelection {
    /// Option group name (e.g. "Size")
    pub group: String,
    /// Selected option name (e.g. "Large")
    pub option: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_addition: Option<f64>,
}

/// Order line item
///
/// `price` is captured when the order is placed and never re-read from the
/// menu afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Menu item reference ("menu_item:key")
    pub item: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub customizations: Vec<CustomizationSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Storage identifier ("orders:key")
    pub id: String,
    /// Human-facing order number, distinct from `id`
    pub order_number: String,
    /// Table reference ("dining_table:key"), immutable after creation
    pub table: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

// =============================================================================
// Payloads
// =============================================================================

/// Line item as supplied by a caller
///
/// Every field is optional so that missing values are reported as
/// validation errors instead of body parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub item: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    #[serde(default)]
    pub customizations: Option<Vec<CustomizationSelection>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table: Option<String>,
    pub items: Option<Vec<OrderItemInput>>,
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Update order payload (contents only, never the table)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

/// Update order status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: Option<String>,
}

// =============================================================================
// Resolved views
// =============================================================================

/// Line item with its menu item resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemDetail {
    /// Menu item reference ("menu_item:key")
    pub item_id: String,
    /// Resolved menu item, `None` when it no longer exists
    pub item: Option<MenuItem>,
    pub quantity: i32,
    pub price: f64,
    pub customizations: Vec<CustomizationSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Order with its table and menu items resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: String,
    pub order_number: String,
    /// Table reference ("dining_table:key")
    pub table_id: String,
    /// Resolved table, `None` when it no longer exists
    pub table: Option<DiningTable>,
    pub items: Vec<OrderItemDetail>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
    pub updated_at: i64,
}
