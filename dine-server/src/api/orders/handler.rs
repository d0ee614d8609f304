//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::{ApiJson, MessageResponse};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate, OrderDetail, OrderStatusUpdate, OrderUpdate};

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderDetail>,
    pub count: usize,
}

impl From<Vec<OrderDetail>> for OrderListResponse {
    fn from(orders: Vec<OrderDetail>) -> Self {
        Self {
            count: orders.len(),
            orders,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse<T> {
    pub order: T,
}

/// GET /api/orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<OrderListResponse>> {
    let orders = state.orders.get_all_orders().await?;
    Ok(Json(orders.into()))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse<OrderDetail>>> {
    let order = state.orders.get_order(&id).await?;
    Ok(Json(OrderResponse { order }))
}

/// GET /api/orders/table/{table_id}
pub async fn list_by_table(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.orders.get_orders_by_table(&table_id).await?;
    Ok(Json(orders.into()))
}

/// GET /api/orders/status/{status}
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.orders.get_orders_by_status(&status).await?;
    Ok(Json(orders.into()))
}

/// POST /api/orders
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<OrderResponse<Order>>)> {
    let order = state.orders.create_order(payload).await?;
    tracing::info!(order_id = %order.id, user = %user.username, "Order placed via API");
    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}

/// PATCH /api/orders/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<OrderUpdate>,
) -> AppResult<Json<OrderResponse<OrderDetail>>> {
    let order = state.orders.update_order(&id, payload).await?;
    tracing::info!(order_id = %order.id, user = %user.username, "Order edited via API");
    Ok(Json(OrderResponse { order }))
}

/// PATCH /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<OrderStatusUpdate>,
) -> AppResult<Json<OrderResponse<OrderDetail>>> {
    let order = state.orders.update_order_status(&id, payload).await?;
    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        user = %user.username,
        "Order status changed via API"
    );
    Ok(Json(OrderResponse { order }))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let order = state.orders.delete_order(&id).await?;
    tracing::info!(order_id = %order.id, user = %user.username, "Order removed via API");
    Ok(Json(MessageResponse::new("Order removed")))
}
