//! Menu Item API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/category/{category_id}", get(handler::list_by_category))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .put(handler::update)
                .delete(handler::delete),
        )
}
