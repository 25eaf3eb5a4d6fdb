//! Customer API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/bulk", post(handler::bulk_create))
        .route("/query", post(handler::list))
}
