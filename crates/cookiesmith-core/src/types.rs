//! Shared data types.

use serde::{Deserialize, Serialize};

/// One `name=value` pair as enumerated by the browser's cookie jar.
///
/// The jar carries more attributes (domain, path, expiry); the pipeline does
/// not interpret them and only forwards the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
