//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::{ApiJson, MessageResponse, non_blank};
use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
}

fn category_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::CategoryNotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::CategoryNameExists, msg),
        other => other.into(),
    }
}

fn not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNotFound,
        format!("No category with id: {}", id),
    )
    .with_detail("id", id)
}

/// GET /api/category
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<CategoryListResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await.map_err(category_error)?;
    Ok(Json(CategoryListResponse {
        count: categories.len(),
        categories,
    }))
}

/// GET /api/category/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CategoryResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await
        .map_err(category_error)?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(CategoryResponse { category }))
}

/// POST /api/category
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let Some(name) = non_blank(payload.name) else {
        return Err(AppError::required("Please provide category name"));
    };

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .create(
            name,
            non_blank(payload.description),
            payload.display_order.unwrap_or(0),
            non_blank(payload.thumbnail_url),
        )
        .await
        .map_err(category_error)?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// PATCH /api/category/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CategoryUpdate>,
) -> AppResult<Json<CategoryResponse>> {
    if payload.name.is_some() && non_blank(payload.name.clone()).is_none() {
        return Err(AppError::required("Please provide category name"));
    }

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .update(
            &id,
            non_blank(payload.name),
            non_blank(payload.description),
            payload.display_order,
            non_blank(payload.thumbnail_url),
        )
        .await
        .map_err(category_error)?;
    tracing::info!(category_id = %category.id, "Category updated");

    Ok(Json(CategoryResponse { category }))
}

/// DELETE /api/category/{id}
///
/// Menu items keep their now dangling category reference.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = CategoryRepository::new(state.db.clone());
    if !repo.delete(&id).await.map_err(category_error)? {
        return Err(not_found(&id));
    }
    tracing::info!(category_id = %id, "Category removed");
    Ok(Json(MessageResponse::new("Category removed")))
}
