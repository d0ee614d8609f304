//! Order API Module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | GET | - |
//! | /api/orders | POST | required |
//! | /api/orders/{id} | GET | - |
//! | /api/orders/{id} | PATCH, DELETE | required |
//! | /api/orders/{id}/status | PATCH | required |
//! | /api/orders/table/{table_id} | GET | - |
//! | /api/orders/status/{status} | GET | - |

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/status", patch(handler::update_status))
        .route("/table/{table_id}", get(handler::list_by_table))
        .route("/status/{status}", get(handler::list_by_status))
}
