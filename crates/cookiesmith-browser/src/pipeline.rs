//! The request-scoped harvesting pipeline.
//!
//! Strictly linear: acquire, navigate, harvest. The session is released
//! before the caller sees the outcome, on every path.

use std::time::Instant;

use tracing::{info, warn};

use cookiesmith_core::{CookieRecord, HarvesterConfig, Result};

use crate::harvest;
use crate::lifecycle::HarvestSession;
use crate::navigate;

/// Raw session state captured by one pipeline run.
#[derive(Debug, Clone)]
pub struct HarvestCapture {
    /// Cookie jar in the browser's enumeration order.
    pub cookies: Vec<CookieRecord>,
    /// The user-agent the page actually reported.
    pub user_agent: String,
}

/// Run one harvesting pipeline against the configured target.
///
/// A launch failure surfaces before any session exists, so navigation is
/// never reached. Once a session exists it is released exactly once,
/// whatever the drive stages return; `release` consumes the session, so the
/// single call below is the only one possible.
pub async fn run(config: &HarvesterConfig) -> Result<HarvestCapture> {
    let entered = Instant::now();

    let session = HarvestSession::launch(&config.launch).await?;

    let outcome = drive(&session, config).await;

    session.release().await;

    match &outcome {
        Ok(capture) => info!(
            cookies = capture.cookies.len(),
            elapsed_ms = entered.elapsed().as_millis() as u64,
            "harvest pipeline complete"
        ),
        Err(e) => warn!(
            error = %e,
            elapsed_ms = entered.elapsed().as_millis() as u64,
            "harvest pipeline failed"
        ),
    }

    outcome
}

async fn drive(session: &HarvestSession, config: &HarvesterConfig) -> Result<HarvestCapture> {
    navigate::navigate(session.page(), &config.navigation).await?;
    let (cookies, user_agent) = harvest::harvest(session.page()).await?;
    Ok(HarvestCapture {
        cookies,
        user_agent,
    })
}
