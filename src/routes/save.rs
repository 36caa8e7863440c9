use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::SaveError;
use crate::sinks::SinkOutcome;
use crate::state::SharedState;
use crate::submission::pipeline;

pub async fn save(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, SaveError> {
    let outcome = pipeline::run(&state, &headers, &body).await?;

    let body = match outcome {
        SinkOutcome::Forwarded { response } => json!({
            "ok": true,
            "forwarded": true,
            "apps_script_response": response,
        }),
        SinkOutcome::Saved { saved_to } => json!({
            "ok": true,
            "forwarded": false,
            "saved_to": saved_to,
        }),
    };

    Ok((StatusCode::OK, Json(body)).into_response())
}

pub async fn save_options() -> Response {
    (
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}
