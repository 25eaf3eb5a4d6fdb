//! Order API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate};
use shared::request::ListRequest;
use shared::response::{Connection, OrderPayload};

/// POST /api/orders - run the order workflow
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> Json<OrderPayload> {
    Json(state.services.orders.create_order(payload).await)
}

/// POST /api/orders/query
pub async fn list(
    State(state): State<ServerState>,
    Json(request): Json<ListRequest>,
) -> AppResult<Json<Connection<Order>>> {
    let connection = state.services.orders.list(&request).await?;
    Ok(Json(connection))
}
