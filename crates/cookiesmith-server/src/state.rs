//! Shared application state.

use cookiesmith_core::HarvesterConfig;

/// State accessible from all route handlers.
///
/// Holds only immutable configuration: each harvest request runs an
/// independent pipeline instance, so there is no shared mutable state and
/// nothing to lock.
pub struct AppState {
    pub config: HarvesterConfig,
}

impl AppState {
    pub fn new(config: HarvesterConfig) -> Self {
        Self { config }
    }
}
