//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the platform, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a missing required field error
    pub fn required(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RequiredField, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an unauthorized error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }
}

/// Unified API response structure
///
/// Error responses carry `code`, `message` and optional `details`. Success
/// bodies on this API are resource-shaped (`{order}`, `{orders, count}`)
/// and do not go through this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // System errors are logged in full and reported to the caller
        // with the generic code message only.
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let body = ApiResponse::<()>::error(&AppError::new(self.code));
            return (status, Json(body)).into_response();
        }

        let body = ApiResponse::<()>::error(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Each item must have a valid price")
            .with_detail("index", 2)
            .with_detail("field", "price");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("index").unwrap(), 2);
        assert_eq!(details.get("field").unwrap(), "price");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::not_found("Order order:abc");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order order:abc not found");
        assert!(err.details.as_ref().unwrap().contains_key("resource"));

        assert_eq!(AppError::unauthorized().code, ErrorCode::NotAuthenticated);
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(AppError::database("down").code, ErrorCode::DatabaseError);
        assert_eq!(AppError::conflict("dup").code, ErrorCode::AlreadyExists);
        assert_eq!(AppError::required("name").code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "No order with id: order:x");
        assert_eq!(format!("{}", err), "No order with id: order:x");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::with_message(ErrorCode::TableNotFound, "Table not found")
            .with_detail("id", "dining_table:t1");
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(7001));
        assert_eq!(response.message, "Table not found");
        assert!(response.data.is_none());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize_skips_empty_fields() {
        let err = AppError::new(ErrorCode::OrderEmpty);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["code"], 4007);
        assert_eq!(json["message"], "Order must contain at least one item");
        assert!(json.get("data").is_none());
        assert!(json.get("details").is_none());
    }
}
