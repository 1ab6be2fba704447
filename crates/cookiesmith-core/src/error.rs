//! Error types for CookieSmith.
//!
//! Teardown failures are deliberately absent: releasing a session never
//! fails from the caller's point of view, it only logs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Navigation timed out after {0}ms")]
    NavigationTimeout(u64),

    #[error("Cookie extraction failed: {0}")]
    Extraction(String),

    #[error("Cookie jar empty after navigation")]
    EmptyCookieJar,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_mentions_the_budget() {
        let msg = Error::NavigationTimeout(30_000).to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30000ms"));
    }

    #[test]
    fn empty_jar_is_not_a_timeout() {
        let msg = Error::EmptyCookieJar.to_string();
        assert!(msg.contains("empty"));
        assert!(!msg.contains("timed out"));
    }
}
