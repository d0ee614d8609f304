//! Shared types for the dine platform
//!
//! Common types used by the server and its clients: the unified error
//! system, API data models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
