//! Node API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/nodes/{global_id}", get(handler::get_by_global_id))
}
