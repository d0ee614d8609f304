use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Payload rejected before any write
    #[error("{1}")]
    Validation(ErrorCode, String),

    #[error("No order with id: {0}")]
    OrderNotFound(String),

    /// Order references a table that does not exist
    #[error("Invalid table: {0}")]
    TableNotFound(String),

    /// Line item references a menu item that does not exist
    #[error("Invalid menu item: {0}")]
    MenuItemNotFound(String),

    #[error("Menu item is not available: {0}")]
    MenuItemUnavailable(String),

    #[error("Could not allocate a unique order number after {0} attempts")]
    OrderNumberExhausted(u32),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(code, message) => AppError::with_message(code, message),
            ManagerError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("No order with id: {}", id))
                    .with_detail("id", id)
            }
            ManagerError::TableNotFound(id) => {
                AppError::new(ErrorCode::OrderTableInvalid).with_detail("table", id)
            }
            ManagerError::MenuItemNotFound(id) => {
                AppError::new(ErrorCode::OrderItemInvalid).with_detail("item", id)
            }
            ManagerError::MenuItemUnavailable(id) => {
                AppError::new(ErrorCode::MenuItemUnavailable).with_detail("item", id)
            }
            ManagerError::OrderNumberExhausted(attempts) => {
                AppError::new(ErrorCode::OrderNumberExhausted).with_detail("attempts", attempts)
            }
            ManagerError::Storage(e) => {
                tracing::error!(error = %e, "Order storage error");
                AppError::from(e)
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
