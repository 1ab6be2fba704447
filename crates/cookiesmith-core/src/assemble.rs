//! Response assembly — the externally visible payloads.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ids;
use crate::types::CookieRecord;

/// Successful harvest payload. Immutable once constructed; lives only for
/// the duration of the HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPayload {
    pub success: bool,
    pub cookie_header: String,
    pub user_agent_real: String,
    pub correlation_id: String,
    pub external_ref_id: String,
    /// Epoch milliseconds at assembly time.
    pub timestamp: i64,
    pub cookies_count: usize,
    /// ISO-8601 at assembly time.
    pub generated_at: String,
}

/// Failure payload, returned with a server-error status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailurePayload {
    pub success: bool,
    pub error: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Join cookie pairs into a single `Cookie` header value.
///
/// Order is the harvester's enumeration order; duplicate names are kept
/// verbatim.
pub fn cookie_header(cookies: &[CookieRecord]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Assemble the success payload from harvested session state.
///
/// Both identifiers are drawn independently; both timestamps are captured
/// here, at assembly time, so they may trail the request's entry time by the
/// pipeline's latency.
pub fn assemble(cookies: &[CookieRecord], user_agent: &str) -> SessionPayload {
    let now = Utc::now();
    SessionPayload {
        success: true,
        cookie_header: cookie_header(cookies),
        user_agent_real: user_agent.to_string(),
        correlation_id: ids::webapp_id(),
        external_ref_id: ids::webapp_id(),
        timestamp: now.timestamp_millis(),
        cookies_count: cookies.len(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Assemble a failure payload from a pipeline error.
///
/// `include_details` is the deployment's choice; when off, the payload
/// carries only the human-readable message.
pub fn failure(error: &Error, include_details: bool) -> FailurePayload {
    FailurePayload {
        success: false,
        error: error.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        details: include_details.then(|| format!("{:?}", error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn jar(pairs: &[(&str, &str)]) -> Vec<CookieRecord> {
        pairs
            .iter()
            .map(|(n, v)| CookieRecord::new(*n, *v))
            .collect()
    }

    #[test]
    fn header_preserves_enumeration_order() {
        let cookies = jar(&[("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(cookie_header(&cookies), "b=2; a=1; c=3");
    }

    #[test]
    fn header_preserves_duplicate_names() {
        let cookies = jar(&[("sid", "old"), ("sid", "new")]);
        assert_eq!(cookie_header(&cookies), "sid=old; sid=new");
    }

    #[test]
    fn count_matches_header_segments() {
        let cookies = jar(&[
            ("a", "1"),
            ("b", "2"),
            ("c", "3"),
            ("d", "4"),
            ("e", "5"),
            ("f", "6"),
            ("g", "7"),
            ("h", "8"),
            ("i", "9"),
            ("j", "10"),
            ("k", "11"),
            ("l", "12"),
        ]);
        let payload = assemble(&cookies, "UA");
        assert_eq!(payload.cookies_count, 12);
        assert_eq!(payload.cookie_header.split("; ").count(), 12);
    }

    #[test]
    fn identifiers_are_generated_independently() {
        let payload = assemble(&jar(&[("a", "1")]), "UA");
        assert_ne!(payload.correlation_id, payload.external_ref_id);
        assert!(payload.correlation_id.starts_with("webapp-"));
        assert!(payload.external_ref_id.starts_with("webapp-"));
    }

    #[test]
    fn timestamps_are_not_before_entry() {
        let entry = Utc::now();
        let payload = assemble(&jar(&[("a", "1")]), "UA");

        assert!(payload.timestamp >= entry.timestamp_millis());
        let generated = DateTime::parse_from_rfc3339(&payload.generated_at).unwrap();
        assert!(generated.timestamp_millis() >= entry.timestamp_millis());
    }

    #[test]
    fn success_payload_is_success_shaped() {
        let payload = assemble(&jar(&[("a", "1")]), "Mozilla/5.0");
        assert!(payload.success);
        assert_eq!(payload.user_agent_real, "Mozilla/5.0");
        assert!(payload.cookies_count >= 1);
    }

    #[test]
    fn failure_payload_without_details() {
        let payload = failure(&Error::EmptyCookieJar, false);
        assert!(!payload.success);
        assert!(payload.error.contains("empty"));
        assert!(payload.details.is_none());
        assert!(DateTime::parse_from_rfc3339(&payload.timestamp).is_ok());
    }

    #[test]
    fn failure_payload_with_details() {
        let payload = failure(&Error::NavigationTimeout(30_000), true);
        assert!(payload.error.contains("timed out"));
        assert_eq!(payload.details.as_deref(), Some("NavigationTimeout(30000)"));
    }
}
