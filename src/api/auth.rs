use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::json;
use crate::api::AppState;

/// Require `Authorization: Bearer <token>` when the server has a token
/// configured. The health endpoint stays open.
pub async fn api_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    if let Some(expected_token) = state.api_token.as_deref() {
        if request.uri().path() != "/api/health" {
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
    }

    Ok(next.run(request).await)
}
