use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::sinks::csv_file;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    forwarding: bool,
    saved_to: String,
}

pub async fn index(State(state): State<SharedState>) -> Response {
    let template = IndexTemplate {
        forwarding: state.config.forwarding_enabled(),
        saved_to: csv_file::display_name(&state.config.data_path),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render form page: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
