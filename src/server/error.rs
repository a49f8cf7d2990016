use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::YtdError;

/// Error returned to HTTP clients as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<YtdError> for ApiError {
    fn from(err: YtdError) -> Self {
        match err {
            YtdError::InvalidUrl(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid YouTube URL or video ID")
            }
            // already logged with its cause by the fetcher
            YtdError::RetrievalFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve video information",
            ),
            YtdError::Unplayable { reason, .. } => Self::new(StatusCode::FORBIDDEN, reason),
            YtdError::StreamNotFound => {
                Self::new(StatusCode::NOT_FOUND, "No suitable stream URL found")
            }
            other => {
                tracing::error!("Unexpected error: {}", other);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
