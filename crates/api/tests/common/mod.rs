#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use stackdesk_api::config::ServerConfig;
use stackdesk_api::router::{build_app_router, build_state};
use tempfile::TempDir;

pub const BOUNDARY: &str = "stackdesk-test-boundary";

/// Build a test `ServerConfig` with safe defaults, staging uploads under
/// `staging_dir`.
pub fn test_config(staging_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        staging_dir: staging_dir.to_path_buf(),
        staging_ttl_secs: 3600,
        max_upload_bytes: 1024 * 1024,
        log_json: false,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
///
/// Staged uploads go to a fresh temp dir that is removed when the returned
/// `TempDir` drops, so keep it bound for the length of the test.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    let staging = tempfile::tempdir().expect("create staging dir");
    let config = test_config(staging.path());
    let state = build_state(pool, config.clone());
    (build_app_router(state, &config), staging)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a single multipart field named `field` holding `contents`.
pub async fn post_file(app: Router, uri: &str, field: &str, contents: &[u8]) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"applications.csv\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
