//! Order payload validation
//!
//! Every check here runs before the first store call, so a rejected
//! payload never leaves a partial write behind.

use shared::error::ErrorCode;
use shared::models::{OrderCreate, OrderItem, OrderItemInput, OrderStatus, PaymentMethod};

use super::manager::{ManagerError, ManagerResult};

/// Allowed gap between the supplied total and the line item sum
pub const TOTAL_TOLERANCE: f64 = 0.005;

/// Create payload with every required field present and checked
#[derive(Debug, Clone)]
pub struct ValidatedCreate {
    pub table: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
}

fn invalid(code: ErrorCode, message: impl Into<String>) -> ManagerError {
    ManagerError::Validation(code, message.into())
}

fn required_values() -> ManagerError {
    invalid(ErrorCode::RequiredField, "Please provide all required values")
}

pub fn validate_create(payload: OrderCreate) -> ManagerResult<ValidatedCreate> {
    let table = payload
        .table
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(required_values)?;

    let items = match payload.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(invalid(ErrorCode::OrderEmpty, ErrorCode::OrderEmpty.message())),
    };

    let total_amount = payload.total_amount.ok_or_else(required_values)?;
    let total_amount = validate_total(total_amount)?;
    let items = validate_items(items)?;

    Ok(ValidatedCreate {
        table,
        items,
        total_amount,
        payment_method: payload.payment_method.unwrap_or_default(),
    })
}

pub fn validate_total(total_amount: f64) -> ManagerResult<f64> {
    if !total_amount.is_finite() || total_amount <= 0.0 {
        return Err(invalid(
            ErrorCode::ValidationFailed,
            "Total amount must be a positive number",
        ));
    }
    Ok(total_amount)
}

/// Check line items in order, reporting the first bad one
pub fn validate_items(items: Vec<OrderItemInput>) -> ManagerResult<Vec<OrderItem>> {
    if items.is_empty() {
        return Err(invalid(ErrorCode::OrderEmpty, ErrorCode::OrderEmpty.message()));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect()
}

fn validate_item(index: usize, item: OrderItemInput) -> ManagerResult<OrderItem> {
    let price = item
        .price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| {
            tracing::debug!(index, price = ?item.price, "Rejected line item price");
            invalid(
                ErrorCode::OrderItemInvalidPrice,
                ErrorCode::OrderItemInvalidPrice.message(),
            )
        })?;

    let quantity = item.quantity.filter(|q| *q >= 1).ok_or_else(|| {
        invalid(
            ErrorCode::OrderItemInvalidQuantity,
            ErrorCode::OrderItemInvalidQuantity.message(),
        )
    })?;

    let menu_item = item
        .item
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .ok_or_else(|| {
            invalid(
                ErrorCode::RequiredField,
                "Each item must reference a menu item",
            )
        })?;

    Ok(OrderItem {
        item: menu_item,
        quantity,
        price,
        customizations: item.customizations.unwrap_or_default(),
        notes: item.notes.filter(|n| !n.trim().is_empty()),
    })
}

/// Parse a requested status. Missing or blank is a validation error; a
/// value outside the known set is `OrderInvalidStatus`.
pub fn parse_status(raw: Option<&str>) -> ManagerResult<OrderStatus> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(ErrorCode::RequiredField, "Please provide order status"))?;
    raw.parse::<OrderStatus>().map_err(|_| {
        invalid(
            ErrorCode::OrderInvalidStatus,
            format!("Unknown order status: {}", raw),
        )
    })
}

/// Sum of price × quantity over the line items
pub fn items_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_total).sum()
}

/// Whether the caller-supplied total disagrees with the line items
pub fn total_mismatch(items: &[OrderItem], total_amount: f64) -> bool {
    (items_total(items) - total_amount).abs() > TOTAL_TOLERANCE
}
