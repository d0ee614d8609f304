//! Unified error codes for the dine platform
//!
//! Error codes are shared by the server and its clients and are organized
//! by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 6xxx: Menu errors (items and categories)
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so that clients can match
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4007,
    /// Order status is not one of the known values
    OrderInvalidStatus = 4008,
    /// Line item price is missing or not positive
    OrderItemInvalidPrice = 4009,
    /// Line item quantity is below one
    OrderItemInvalidQuantity = 4010,
    /// Could not allocate a unique order number
    OrderNumberExhausted = 4011,
    /// Order references a table that does not exist
    OrderTableInvalid = 4012,
    /// Line item references a menu item that does not exist
    OrderItemInvalid = 4013,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 6002,
    /// Menu item is not available for ordering
    MenuItemUnavailable = 6003,
    /// Menu item references a category that does not exist
    MenuItemCategoryInvalid = 6004,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table number already exists
    TableNumberExists = 7002,
    /// Table capacity is below one
    TableInvalidCapacity = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderInvalidStatus => "Unknown order status",
            ErrorCode::OrderItemInvalidPrice => "Each item must have a valid price",
            ErrorCode::OrderItemInvalidQuantity => "Each item must have a quantity of at least 1",
            ErrorCode::OrderNumberExhausted => "Could not allocate a unique order number",
            ErrorCode::OrderTableInvalid => "Invalid table",
            ErrorCode::OrderItemInvalid => "Invalid menu item",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Menu item price must be positive",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",
            ErrorCode::MenuItemCategoryInvalid => "Invalid category",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category with this name already exists",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNumberExists => "Table with this number already exists",
            ErrorCode::TableInvalidCapacity => "Table capacity must be at least 1",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderInvalidStatus),
            4009 => Ok(ErrorCode::OrderItemInvalidPrice),
            4010 => Ok(ErrorCode::OrderItemInvalidQuantity),
            4011 => Ok(ErrorCode::OrderNumberExhausted),
            4012 => Ok(ErrorCode::OrderTableInvalid),
            4013 => Ok(ErrorCode::OrderItemInvalid),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemInvalidPrice),
            6003 => Ok(ErrorCode::MenuItemUnavailable),
            6004 => Ok(ErrorCode::MenuItemCategoryInvalid),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNumberExists),
            7003 => Ok(ErrorCode::TableInvalidCapacity),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
