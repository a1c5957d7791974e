//! Assertion helpers for tests.

use axum::http::StatusCode;
use image::RgbaImage;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
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

/// Assert a 400 response whose error message contains `needle`
pub fn assert_bad_request(response: &TestResponse, needle: &str) {
    assert_status(response, StatusCode::BAD_REQUEST);
    let message = response.error_message();
    assert!(
        message.contains(needle),
        "Expected error containing {needle:?}, got {message:?}"
    );
}

/// Assert a successful export and return the decoded image
pub fn assert_exported_png(response: &TestResponse) -> RgbaImage {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true);

    let png = response.exported_png();
    assert!(
        png.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG signature, got {:?}",
        &png[..8.min(png.len())]
    );
    image::load_from_memory(&png)
        .expect("exportedImage should decode")
        .to_rgba8()
}

/// Assert two pixels match within `tolerance` per channel
pub fn assert_pixel_near(actual: [u8; 4], expected: [u8; 4], tolerance: u8) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= tolerance);
    assert!(
        close,
        "Pixel {actual:?} not within {tolerance} of {expected:?}"
    );
}
