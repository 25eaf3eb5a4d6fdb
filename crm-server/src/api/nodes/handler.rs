//! Node API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::services::resolve_node;
use crate::utils::{AppError, AppResult};
use shared::models::Node;

/// GET /api/nodes/{global_id}
pub async fn get_by_global_id(
    State(state): State<ServerState>,
    Path(global_id): Path<String>,
) -> AppResult<Json<Node>> {
    resolve_node(&state.services, &global_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Node").with_detail("id", global_id))
}
