//! Payload-shape tests — validates that serialized responses match the
//! wire contract a downstream caller depends on.
//!
//! These tests assemble payloads directly (no browser, no HTTP server
//! needed) and verify serialized field names, types, and invariants.

use cookiesmith_core::{assemble, CookieRecord, Error};
use regex::Regex;

fn jar(pairs: &[(&str, &str)]) -> Vec<CookieRecord> {
    pairs
        .iter()
        .map(|(n, v)| CookieRecord::new(*n, *v))
        .collect()
}

const ID_PATTERN: &str =
    "^webapp-[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

/// Verify the success response carries every required field with the
/// documented type:
/// { success, cookie_header, user_agent_real, correlation_id,
///   external_ref_id, timestamp, cookies_count, generated_at }
#[test]
fn test_success_payload_shape() {
    let payload = assemble::assemble(&jar(&[("sid", "abc"), ("csrf", "xyz")]), "Mozilla/5.0");
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["success"], serde_json::json!(true));
    assert!(json["cookie_header"].is_string());
    assert!(json["user_agent_real"].is_string());
    assert!(json["correlation_id"].is_string());
    assert!(json["external_ref_id"].is_string());
    assert!(json["timestamp"].is_i64());
    assert!(json["cookies_count"].is_u64());
    assert!(json["generated_at"].is_string());
}

/// Verify both identifiers match the documented `webapp-<uuid>` shape and
/// are drawn independently.
#[test]
fn test_identifier_format() {
    let re = Regex::new(ID_PATTERN).unwrap();
    let payload = assemble::assemble(&jar(&[("a", "1")]), "UA");

    assert!(re.is_match(&payload.correlation_id));
    assert!(re.is_match(&payload.external_ref_id));
    assert_ne!(payload.correlation_id, payload.external_ref_id);
}

/// Twelve harvested cookies produce `cookies_count: 12` and exactly twelve
/// `name=value` segments in harvester order.
#[test]
fn test_cookie_header_matches_count() {
    let pairs: Vec<(String, String)> = (1..=12)
        .map(|i| (format!("c{}", i), format!("v{}", i)))
        .collect();
    let cookies: Vec<CookieRecord> = pairs
        .iter()
        .map(|(n, v)| CookieRecord::new(n.clone(), v.clone()))
        .collect();

    let payload = assemble::assemble(&cookies, "UA");
    assert_eq!(payload.cookies_count, 12);

    let segments: Vec<&str> = payload.cookie_header.split("; ").collect();
    assert_eq!(segments.len(), 12);
    assert_eq!(segments[0], "c1=v1");
    assert_eq!(segments[11], "c12=v12");
}

/// Verify the failure response shape:
/// { success: false, error, timestamp } with `details` omitted unless the
/// deployment opts in.
#[test]
fn test_failure_payload_shape() {
    let payload = assemble::failure(&Error::NavigationTimeout(30_000), false);
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["success"], serde_json::json!(false));
    assert!(json["error"].is_string());
    assert!(json["timestamp"].is_string());
    assert!(json.get("details").is_none());

    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("timed out"), "timeout not mentioned: {}", msg);
}

/// Failure details appear only when enabled.
#[test]
fn test_failure_details_opt_in() {
    let with = assemble::failure(&Error::Launch("spawn failed".into()), true);
    let without = assemble::failure(&Error::Launch("spawn failed".into()), false);

    assert!(with.details.is_some());
    assert!(without.details.is_none());
}

/// An empty jar can never be expressed as a success payload: the harvester
/// refuses it upstream, and even the error message is failure-shaped.
#[test]
fn test_empty_jar_is_failure_shaped() {
    let payload = assemble::failure(&Error::EmptyCookieJar, false);
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["success"], serde_json::json!(false));
    assert!(json.get("cookies_count").is_none());
    assert!(json.get("cookie_header").is_none());
}
