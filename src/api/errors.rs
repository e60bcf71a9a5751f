use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::AssessError;

impl IntoResponse for AssessError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AssessError::EmptySelection
            | AssessError::UnknownControl(_) => StatusCode::BAD_REQUEST,
            AssessError::UnknownCategory(_) => StatusCode::NOT_FOUND,
            AssessError::SessionBusy(_)
            | AssessError::InvalidState(_) => StatusCode::CONFLICT,
            e if e.is_dispatch_failure() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
