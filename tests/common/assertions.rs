//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is OK with the given Content-Type
pub fn assert_content_type(response: &TestResponse, expected: &str) {
    assert_ok(response);
    let content_type = response.header("content-type").unwrap_or_default();
    assert!(
        content_type.starts_with(expected),
        "Expected Content-Type {expected}, got {content_type:?}"
    );
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_content_type(response, "image/png");
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
}

/// Assert JSON error response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Missing error message");
}

/// Find a swatch in a JSON swatch list by base name
pub fn find_swatch<'a>(swatches: &'a serde_json::Value, base: &str) -> &'a serde_json::Value {
    swatches
        .as_array()
        .expect("swatches is not an array")
        .iter()
        .find(|s| s["base"] == base)
        .unwrap_or_else(|| panic!("no swatch for {base}"))
}
