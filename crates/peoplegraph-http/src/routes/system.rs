//! Root, health and API description endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use utoipa::OpenApi;

use crate::ApiDoc;
use crate::state::AppState;
use crate::types::{HealthResponse, MessageResponse};

/// Greeting returned by `GET /`.
pub const ROOT_MESSAGE: &str = "API running on the graph store";

/// Liveness greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API is up", body = MessageResponse)),
    tag = "System"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Check server health.
///
/// Reports version, uptime and which store backend is active. Does not
/// contact the store.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Server is healthy", body = HealthResponse)),
    tag = "System"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.sessions().backend().to_string(),
        uptime_seconds: state.uptime_secs(),
    })
}

/// OpenAPI document for this API.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
