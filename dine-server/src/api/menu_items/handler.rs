//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::{ApiJson, MessageResponse, non_blank};
use crate::core::ServerState;
use crate::db::models::MenuItemRecord;
use crate::db::repository::{
    CategoryRepository, MenuItemRepository, RepoError, category, record_id,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

#[derive(Debug, Serialize)]
pub struct MenuItemListResponse {
    pub menu_items: Vec<MenuItem>,
    pub count: usize,
}

impl From<Vec<MenuItem>> for MenuItemListResponse {
    fn from(menu_items: Vec<MenuItem>) -> Self {
        Self {
            count: menu_items.len(),
            menu_items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub menu_item: MenuItem,
}

fn menu_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::MenuItemNotFound, msg),
        other => other.into(),
    }
}

fn not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::MenuItemNotFound,
        format!("No menu item with id: {}", id),
    )
    .with_detail("id", id)
}

fn check_price(price: f64) -> AppResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            "Price must be a positive number",
        ));
    }
    Ok(price)
}

/// Resolve a category reference to its canonical id
async fn resolve_category(state: &ServerState, raw: &str) -> AppResult<String> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.find_by_id(raw)
        .await
        .map_err(menu_error)?
        .map(|c| c.id)
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::MenuItemCategoryInvalid, "Invalid category")
                .with_detail("category", raw)
        })
}

/// GET /api/menu
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<MenuItemListResponse>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_all().await.map_err(menu_error)?;
    Ok(Json(items.into()))
}

/// GET /api/menu/category/{category_id}
///
/// 404 when the category has no items (or does not exist).
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<MenuItemListResponse>> {
    let no_items = || {
        AppError::with_message(
            ErrorCode::NotFound,
            format!("No menu items found for category: {}", category_id),
        )
    };
    let category = record_id(category::TABLE, &category_id).ok_or_else(no_items)?;

    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo
        .find_by_category(&category.to_string())
        .await
        .map_err(menu_error)?;
    if items.is_empty() {
        return Err(no_items());
    }
    Ok(Json(items.into()))
}

/// GET /api/menu/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemResponse>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let menu_item = repo
        .find_by_id(&id)
        .await
        .map_err(menu_error)?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(MenuItemResponse { menu_item }))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItemResponse>)> {
    let (Some(name), Some(description), Some(price), Some(category)) = (
        non_blank(payload.name),
        non_blank(payload.description),
        payload.price,
        non_blank(payload.category),
    ) else {
        return Err(AppError::required("Please provide all required values"));
    };
    let price = check_price(price)?;
    let category = resolve_category(&state, &category).await?;

    let repo = MenuItemRepository::new(state.db.clone());
    let menu_item = repo
        .create(MenuItemRecord {
            id: None,
            name,
            description,
            price,
            category,
            image_url: non_blank(payload.image_url).unwrap_or_default(),
            customization_options: payload.customization_options.unwrap_or_default(),
            is_available: payload.is_available.unwrap_or(true),
            created_at: 0,
            updated_at: 0,
        })
        .await
        .map_err(menu_error)?;
    tracing::info!(
        menu_item_id = %menu_item.id,
        name = %menu_item.name,
        category = %menu_item.category,
        "Menu item created"
    );

    Ok((StatusCode::CREATED, Json(MenuItemResponse { menu_item })))
}

/// PATCH /api/menu/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(mut payload): ApiJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItemResponse>> {
    for (field, value) in [("name", &payload.name), ("description", &payload.description)] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::validation(format!("{} cannot be empty", field)));
        }
    }
    payload.price = payload.price.map(check_price).transpose()?;
    payload.category = match non_blank(payload.category.take()) {
        Some(raw) => Some(resolve_category(&state, &raw).await?),
        None => None,
    };
    payload.image_url = non_blank(payload.image_url.take());

    let repo = MenuItemRepository::new(state.db.clone());
    let menu_item = repo.update(&id, payload).await.map_err(menu_error)?;
    tracing::info!(
        menu_item_id = %menu_item.id,
        is_available = menu_item.is_available,
        "Menu item updated"
    );

    Ok(Json(MenuItemResponse { menu_item }))
}

/// DELETE /api/menu/{id}
///
/// Orders keep their line items; reads resolve the missing item to null.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = MenuItemRepository::new(state.db.clone());
    if !repo.delete(&id).await.map_err(menu_error)? {
        return Err(not_found(&id));
    }
    tracing::info!(menu_item_id = %id, "Menu item removed");
    Ok(Json(MessageResponse::new("Menu item removed")))
}
