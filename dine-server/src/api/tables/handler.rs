//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::{ApiJson, MessageResponse, non_blank};
use crate::core::ServerState;
use crate::db::repository::{DiningTableRepository, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

#[derive(Debug, Serialize)]
pub struct TableListResponse {
    pub tables: Vec<DiningTable>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub table: DiningTable,
}

/// Map repository failures onto table error codes
fn table_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::TableNotFound, msg),
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::TableNumberExists, msg),
        other => other.into(),
    }
}

fn not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("No table with id: {}", id))
        .with_detail("id", id)
}

fn check_capacity(capacity: i32) -> AppResult<i32> {
    if capacity < 1 {
        return Err(AppError::with_message(
            ErrorCode::TableInvalidCapacity,
            "Capacity must be at least 1",
        ));
    }
    Ok(capacity)
}

/// GET /api/tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<TableListResponse>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await.map_err(table_error)?;
    Ok(Json(TableListResponse {
        count: tables.len(),
        tables,
    }))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TableResponse>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await
        .map_err(table_error)?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(TableResponse { table }))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<TableResponse>)> {
    let (Some(table_number), Some(capacity)) = (non_blank(payload.table_number), payload.capacity)
    else {
        return Err(AppError::required("Please provide all required values"));
    };
    let capacity = check_capacity(capacity)?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .create(table_number, capacity, payload.status.unwrap_or_default())
        .await
        .map_err(table_error)?;
    tracing::info!(table_id = %table.id, table_number = %table.table_number, "Table created");

    Ok((StatusCode::CREATED, Json(TableResponse { table })))
}

/// PATCH /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<DiningTableUpdate>,
) -> AppResult<Json<TableResponse>> {
    if payload.table_number.is_some() && non_blank(payload.table_number.clone()).is_none() {
        return Err(AppError::validation("Table number cannot be empty"));
    }
    let capacity = payload.capacity.map(check_capacity).transpose()?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .update(&id, non_blank(payload.table_number), capacity, payload.status)
        .await
        .map_err(table_error)?;
    tracing::info!(table_id = %table.id, status = %table.status, "Table updated");

    Ok(Json(TableResponse { table }))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = DiningTableRepository::new(state.db.clone());
    if !repo.delete(&id).await.map_err(table_error)? {
        return Err(not_found(&id));
    }
    tracing::info!(table_id = %id, "Table removed");
    Ok(Json(MessageResponse::new("Table removed")))
}
