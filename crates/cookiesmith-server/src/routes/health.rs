//! Service info and health routes.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
}

/// GET / — service identity and endpoint map.
async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "service": "CookieSmith Session Service",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "endpoints": {
            "health": "/health",
            "harvest": "/harvest",
        },
    }))
}

/// GET /health — liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
