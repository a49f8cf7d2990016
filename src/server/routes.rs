use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::AppContext;
use super::error::{ApiError, ApiResult};
use crate::stream::{StreamRequest, resolve_stream};

/// `GET /stream?url=...&itag=...&redirect=...`
pub async fn get_stream(
    State(ctx): State<AppContext>,
    query: Result<Query<StreamRequest>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(request) =
        query.map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.body_text()))?;

    let url = resolve_stream(ctx.source.as_ref(), &request.url, request.itag).await?;

    if request.redirect {
        Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
    } else {
        Ok(Json(json!({ "url": url })).into_response())
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Resource not found" })),
    )
}
