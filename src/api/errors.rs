use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::errors::ClarityError;

impl IntoResponse for ClarityError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ClarityError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ClarityError::Config(_) => {
                error!(error = %self, "Service misconfigured");
                (StatusCode::INTERNAL_SERVER_ERROR, "Service is not configured".to_string())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}

impl From<JsonRejection> for ClarityError {
    fn from(rejection: JsonRejection) -> Self {
        ClarityError::Validation(rejection.body_text())
    }
}
