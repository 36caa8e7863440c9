use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Terminal failure of a single save request.
#[derive(Debug)]
pub enum SaveError {
    InvalidPayload(String),
    ForwardingFailed(String),
    LocalPersistFailed(String),
}

impl SaveError {
    pub fn status(&self) -> StatusCode {
        match self {
            SaveError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            SaveError::ForwardingFailed(_) => StatusCode::BAD_GATEWAY,
            SaveError::LocalPersistFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::InvalidPayload(msg) => write!(f, "Invalid JSON: {msg}"),
            SaveError::ForwardingFailed(msg) => write!(f, "Forwarding to webhook failed: {msg}"),
            SaveError::LocalPersistFailed(msg) => write!(f, "Local save failed: {msg}"),
        }
    }
}

impl std::error::Error for SaveError {}

impl IntoResponse for SaveError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            SaveError::InvalidPayload(_) => tracing::debug!("Rejected submission: {self}"),
            SaveError::ForwardingFailed(_) | SaveError::LocalPersistFailed(_) => {
                tracing::error!("{self}")
            }
        }

        let body = json!({ "ok": false, "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
