//! API routes
//!
//! - [`health`] - liveness
//! - [`customers`] - customer creation and listing
//! - [`products`] - product creation and listing
//! - [`orders`] - order workflow and listing
//! - [`nodes`] - global id lookup
//!
//! Mutations always answer 200 with a payload that carries its errors as
//! data. List queries answer with the unified error body on bad filters or
//! cursors.

pub mod customers;
pub mod health;
pub mod nodes;
pub mod orders;
pub mod products;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());
    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(nodes::router())
}

/// Full application with state and middleware
pub fn router(state: ServerState) -> Router {
    build_app()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
