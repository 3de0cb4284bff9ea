//! Endpoints that always fail with a fixed status, for exercising proxies
//! and gateways in front of the server.

use axum::http::StatusCode;

use crate::error::{ApiError, ErrorBody};

pub const FORCED_ERROR_MESSAGE: &str = "Invalid request (forced)";
pub const FORCED_502_BODY: &str = "Simulated 502 from the backend";

/// Always 400.
#[utoipa::path(
    get,
    path = "/force-400",
    responses((status = 400, description = "Forced failure", body = ErrorBody)),
    tag = "Debug"
)]
pub async fn force_400() -> ApiError {
    ApiError::BadRequest(FORCED_ERROR_MESSAGE.to_string())
}

/// Always 404.
#[utoipa::path(
    get,
    path = "/force-404",
    responses((status = 404, description = "Forced failure", body = ErrorBody)),
    tag = "Debug"
)]
pub async fn force_404() -> ApiError {
    ApiError::NotFound(FORCED_ERROR_MESSAGE.to_string())
}

/// Always 502 with a plain-text body.
#[utoipa::path(
    get,
    path = "/force-502",
    responses((status = 502, description = "Forced failure", body = String, content_type = "text/plain")),
    tag = "Debug"
)]
pub async fn force_502() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, FORCED_502_BODY)
}
