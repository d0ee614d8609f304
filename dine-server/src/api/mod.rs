//! HTTP API
//!
//! One module per resource, each exposing `router()`:
//!
//! - [`health`] - liveness and database check
//! - [`orders`] - order lifecycle
//! - [`tables`] - dining tables
//! - [`categories`] - menu categories
//! - [`menu_items`] - menu items
//!
//! Reads are public; every mutating route sits behind `require_auth`.

pub mod categories;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod tables;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::Serialize;

pub use crate::utils::{AppError, AppResult};

/// JSON body extractor whose rejection is an [`AppError`]
///
/// Malformed bodies come back as `ValidationFailed` in the unified error
/// envelope instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(rejection.body_text())),
        }
    }
}

/// `{msg}` body for deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Trimmed, non-empty string
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
