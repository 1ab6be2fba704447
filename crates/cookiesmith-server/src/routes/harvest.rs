//! The harvesting route — one pipeline run per request.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use cookiesmith_core::assemble;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/harvest", get(run_harvest))
}

/// GET /harvest — drive one browser session against the configured target
/// and return its cookie jar.
///
/// Requests are independent and uncoordinated: N concurrent calls launch N
/// browser processes. Admission control belongs to the caller.
async fn run_harvest(State(state): State<Arc<AppState>>) -> Response {
    info!("harvest requested");

    match cookiesmith_browser::run(&state.config).await {
        Ok(capture) => {
            let payload = assemble::assemble(&capture.cookies, &capture.user_agent);
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(e) => {
            let payload = assemble::failure(&e, state.config.error_details);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
