use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

// API Routes - JSON interface for the chat frontend
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/query", post(handlers::api::query))
            .route("/schema", get(handlers::api::get_schema))
            .route("/health", get(handlers::api::health)),
    )
}
