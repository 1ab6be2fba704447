//! CookieSmith — session-bootstrap service.
//!
//! Drives a headless browser against a configured target site and returns
//! the resulting cookie jar and user-agent as a normalized JSON payload.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = cookiesmith_core::HarvesterConfig::from_env()?;
    let port = config.port;

    info!(
        target_url = %config.navigation.target_url,
        wait_strategy = ?config.navigation.wait_strategy,
        "starting harvest service"
    );

    // Build application state
    let state = Arc::new(AppState::new(config));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CookieSmith server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
