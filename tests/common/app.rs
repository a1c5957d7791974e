//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use podmix::models::AppConfig;
use podmix::server::{build_router, create_app_state, AppState};

/// Working box for SVG designs in tests; small enough to keep debug builds quick
pub const TEST_SVG_WORKING_SIZE: u32 = 256;

/// Test application driving the production router in-process
pub struct TestApp {
    router: axum::Router,
}

impl TestApp {
    /// Create a new test application with test-sized defaults
    pub fn new() -> Self {
        Self::with_config(Self::test_config())
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config).expect("Failed to create app state");

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self { router }
    }

    pub fn test_config() -> AppConfig {
        AppConfig {
            svg_working_size: TEST_SVG_WORKING_SIZE,
            ..AppConfig::default()
        }
    }

    /// Create application state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(Self::test_config()).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// Make a POST request with a raw body labelled as JSON
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Error message of a failed request
    pub fn error_message(&self) -> String {
        let json: serde_json::Value = self.json();
        json["error"]
            .as_str()
            .expect("Expected an error field")
            .to_string()
    }

    /// Decode the `exportedImage` data URI into PNG bytes
    pub fn exported_png(&self) -> Vec<u8> {
        let json: serde_json::Value = self.json();
        let uri = json["exportedImage"]
            .as_str()
            .expect("Expected exportedImage to be a string");
        let source = podmix::rendering::DataUri::parse(uri).expect("exportedImage is a data URI");
        assert_eq!(source.mime, "image/png");
        source.bytes
    }
}
