//! HTTP error type and its JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use peoplegraph_service::error::ServiceError;
use serde::Serialize;
use utoipa::ToSchema;

/// Generic message returned with every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error returned by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Store or projection failure. Rendered as 500 with the detail attached.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Client error with a fixed message.
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub(crate) error: String,
    /// Underlying failure detail, present on 500 responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::Service(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
                Some(e.to_string()),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
        };

        (status, axum::Json(ErrorBody { error, details })).into_response()
    }
}
