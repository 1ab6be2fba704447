//! Configuration sourced from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wait condition applied after issuing the page load.
///
/// `NetworkIdle` is stricter (fewer settle-wait false negatives) but slower
/// and more prone to timeouts on noisy sites; `DomContentLoaded` is faster
/// and tolerates background network chatter, at the cost of needing a longer
/// settle-wait to compensate. The deployment picks one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitStrategy {
    #[default]
    DomContentLoaded,
    NetworkIdle,
}

impl FromStr for WaitStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "domContentLoaded" => Ok(Self::DomContentLoaded),
            "networkIdle" => Ok(Self::NetworkIdle),
            other => Err(Error::Config(format!(
                "unrecognized wait strategy '{}' (expected domContentLoaded or networkIdle)",
                other
            ))),
        }
    }
}

/// Immutable browser launch configuration, fixed at construction time and
/// passed to the lifecycle manager as a value, never mutated between
/// launches.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Chromium executable override. `None` lets the engine auto-detect.
    pub executable: Option<PathBuf>,
    /// User-agent override applied to the page before navigation.
    pub user_agent: Option<String>,
    /// Flags required for hermetic headless operation in constrained
    /// environments (containers without a sandbox, /dev/shm, or a GPU).
    pub hardening_args: Vec<String>,
    /// Fixed viewport, width x height.
    pub window: (u32, u32),
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            executable: None,
            user_agent: None,
            hardening_args: default_hardening_args(),
            window: (1920, 1080),
        }
    }
}

/// The static hardening flag set handed to every launch.
pub fn default_hardening_args() -> Vec<String> {
    [
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--disable-software-rasterizer",
        "--disable-extensions",
        "--disable-background-timer-throttling",
        "--disable-backgrounding-occluded-windows",
        "--disable-renderer-backgrounding",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Target page and wait behaviour for the navigation driver.
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    pub target_url: String,
    pub wait_strategy: WaitStrategy,
    /// Budget for the load condition, in milliseconds.
    pub timeout_ms: u64,
    /// Unconditional post-load delay so client-side scripts can finish
    /// setting cookies.
    pub settle_ms: u64,
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct HarvesterConfig {
    /// HTTP server port.
    pub port: u16,
    pub navigation: NavigationConfig,
    pub launch: LaunchConfig,
    /// Include diagnostic `details` in failure payloads.
    pub error_details: bool,
}

impl HarvesterConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `TARGET_URL` is required; the service refuses to start without a
    /// target rather than shipping one baked in.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let target_url = std::env::var("TARGET_URL")
            .map_err(|_| Error::Config("TARGET_URL must be set".to_string()))?;

        let wait_strategy = match std::env::var("WAIT_STRATEGY") {
            Ok(v) => v.parse()?,
            Err(_) => WaitStrategy::default(),
        };

        let timeout_ms = env_u64("NAV_TIMEOUT_MS", 30_000)?;
        let settle_ms = env_u64("SETTLE_MS", 5_000)?;

        let launch = LaunchConfig {
            executable: std::env::var("BROWSER_EXECUTABLE").ok().map(PathBuf::from),
            user_agent: std::env::var("USER_AGENT").ok(),
            ..LaunchConfig::default()
        };

        let error_details = std::env::var("ERROR_DETAILS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            port,
            navigation: NavigationConfig {
                target_url,
                wait_strategy,
                timeout_ms,
                settle_ms,
            },
            launch,
            error_details,
        })
    }
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(v) => v
            .parse()
            .map_err(|_| Error::Config(format!("{} must be an integer, got '{}'", key, v))),
        Err(_) => Ok(default),
    }
}
