//! Per-request identifier generation.
//!
//! Identifiers have the shape `webapp-<uuid-v4>`. They are opaque tracing
//! tokens for the downstream caller; each one is drawn independently and
//! never reused.

use uuid::Uuid;

/// Generate one `webapp-<uuid>` identifier.
pub fn webapp_id() -> String {
    format!("webapp-{}", Uuid::new_v4())
}
