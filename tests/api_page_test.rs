//! Integration tests for the HTML page and rendered images.

mod common;

use axum::http::StatusCode;
use common::{assert_content_type, assert_json_status, assert_png, assert_status, TestApp};
use pretty_assertions::assert_eq;

/// Width and height from the PNG IHDR chunk
fn png_dimensions(png: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (width, height)
}

#[tokio::test]
async fn test_index_page() {
    let app = TestApp::new();

    let response = app.get("/").await;
    assert_content_type(&response, "text/html");

    let html = response.text();
    assert!(html.contains(r#"value="contrast" checked"#));
    assert!(html.contains(r#"id="by-step""#));
    assert!(html.contains("background-color: #3b82f6"));
    // Not in dev mode
    assert!(!html.contains("/dev/events"));
}

#[tokio::test]
async fn test_index_page_overlay_toggle() {
    let app = TestApp::new();

    let html = app.get("/?overlay=luminance").await.text();
    assert!(html.contains(r#"value="luminance" checked"#));
    assert!(!html.contains(r#"value="contrast" checked"#));
}

#[tokio::test]
async fn test_index_page_dev_mode_subscribes_to_events() {
    let app = TestApp::dev();
    let html = app.get("/").await.text();
    assert!(html.contains("/dev/events"));
}

#[tokio::test]
async fn test_palette_svg() {
    let app = TestApp::new();

    let response = app.get("/palette.svg").await;
    assert_content_type(&response, "image/svg+xml");

    let svg = response.text();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="632""#));
    assert_eq!(svg.matches(r##"stroke="#dc2626""##).count(), 5);
}

#[tokio::test]
async fn test_palette_svg_luminance_grid_has_no_rings() {
    let app = TestApp::new();

    let svg = app.get("/palette.svg?overlay=luminance").await.text();
    assert_eq!(svg.matches(r##"stroke="#dc2626""##).count(), 0);
    assert_eq!(svg.matches(r#"stroke="none""#).count(), 80);
}

#[tokio::test]
async fn test_palette_png() {
    let app = TestApp::new();

    let response = app.get("/palette.png").await;
    assert_png(&response);
    assert_eq!(png_dimensions(&response.body), (632, 416));

    let response = app.get("/palette.png?scale=2").await;
    assert_png(&response);
    assert_eq!(png_dimensions(&response.body), (1264, 832));
}

#[tokio::test]
async fn test_palette_png_rejects_unsupported_scale() {
    let app = TestApp::new();

    let response = app.get("/palette.png?scale=9").await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_json_status(&response, 400);
}
