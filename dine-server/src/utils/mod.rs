//! Utilities
//!
//! - [`AppError`] / [`AppResult`] - unified error types (from `shared::error`)
//! - [`logger`] - tracing subscriber setup

pub mod logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
