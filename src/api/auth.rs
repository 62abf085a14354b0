use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;

use super::AppState;

/// Require `Authorization: Bearer <token>` when a server token is configured.
pub async fn api_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    if let Some(expected_token) = state.config.server.api_token.as_deref().filter(|t| !t.is_empty()) {
        let auth_header = request.headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if token == expected_token => {}
            Some(_) => {
                return Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API token"}))));
            }
            None => {
                return Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Missing Authorization header"}))));
            }
        }
    }

    Ok(next.run(request).await)
}
