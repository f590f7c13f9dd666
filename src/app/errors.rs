use crate::utils::error::{ErrorCategory, IngestError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub fn rate_limited_response(limit: usize) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "error": "RATE_LIMITED",
            "message": format!("Request limit of {limit} documents per window exceeded")
        })),
    )
        .into_response()
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, code) = match self.category() {
            ErrorCategory::Request => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ErrorCategory::Storage => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ErrorCategory::Configuration | ErrorCategory::System => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = if self.is_client_error() {
            self.to_string()
        } else {
            "Document was admitted but could not be persisted".to_string()
        };

        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
