//! Product API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate};
use shared::request::ListRequest;
use shared::response::{Connection, ProductPayload};

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> Json<ProductPayload> {
    Json(state.services.products.create(payload).await)
}

/// POST /api/products/query
pub async fn list(
    State(state): State<ServerState>,
    Json(request): Json<ListRequest>,
) -> AppResult<Json<Connection<Product>>> {
    let connection = state.services.products.list(&request).await?;
    Ok(Json(connection))
}
