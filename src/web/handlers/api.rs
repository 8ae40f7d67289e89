use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::llm::models::ConversationTurn;
use crate::pipeline::{QueryOutcome, QueryResponse};
use crate::schema::SchemaDefinition;
use crate::web::state::AppState;

// Query types

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

// Schema

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub description: String,
    pub definition: SchemaDefinition,
}

// System status

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub uptime_seconds: i64,
}

fn status_for(outcome: &QueryOutcome) -> StatusCode {
    match outcome {
        QueryOutcome::Success { .. } => StatusCode::OK,
        QueryOutcome::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        QueryOutcome::GenerationFailed { .. } => StatusCode::BAD_GATEWAY,
        QueryOutcome::ExecutionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

// Natural language query
pub async fn query(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<QueryRequest>,
) -> Response {
    let message = payload.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Message is required".to_string(),
            }),
        )
            .into_response();
    }

    debug!(
        "Query request with {} history turns: {}",
        payload.history.len(),
        message
    );

    let outcome = app_state.pipeline.handle(message, &payload.history).await;
    let status = status_for(&outcome);
    info!("Query finished with status {}", status);

    (status, Json(QueryResponse::from(outcome))).into_response()
}

pub async fn get_schema(State(app_state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    Json(SchemaResponse {
        description: app_state.schema.describe(),
        definition: app_state.schema.as_ref().clone(),
    })
}

pub async fn health(State(app_state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: app_state.config.llm.backend.clone(),
        uptime_seconds: app_state.uptime_seconds(),
    })
}
