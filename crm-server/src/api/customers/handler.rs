//! Customer API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Customer, CustomerCreate};
use shared::request::ListRequest;
use shared::response::{BulkCustomersPayload, Connection, CustomerPayload};

/// POST /api/customers - create one customer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> Json<CustomerPayload> {
    Json(state.services.customers.create(payload).await)
}

/// POST /api/customers/bulk - create many, each independently
pub async fn bulk_create(
    State(state): State<ServerState>,
    Json(payload): Json<Vec<CustomerCreate>>,
) -> Json<BulkCustomersPayload> {
    Json(state.services.customers.bulk_create(payload).await)
}

/// POST /api/customers/query - filtered, paginated list
pub async fn list(
    State(state): State<ServerState>,
    Json(request): Json<ListRequest>,
) -> AppResult<Json<Connection<Customer>>> {
    let connection = state.services.customers.list(&request).await?;
    Ok(Json(connection))
}
