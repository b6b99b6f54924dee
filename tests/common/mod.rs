// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use flashminds::config::Config;
use flashminds::db::FirestoreDb;
use flashminds::middleware::auth::create_jwt;
use flashminds::routes::create_router;
use flashminds::AppState;
use serde_json::Value;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app over the in-memory store with no hosted services.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app over the in-memory store with a custom config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, FirestoreDb::new_in_memory()));
    (create_router(state.clone()), state)
}

/// Session token for `user_id`, signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str) -> String {
    create_jwt(user_id, &Config::test_default().jwt_signing_key).expect("Failed to create JWT")
}

/// Build an authenticated request, with an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(method: &str, uri: &str, user_id: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", create_test_jwt(user_id)),
        );

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}

/// Serve `router` on an ephemeral local port, standing in for a hosted service.
/// Returns the base URL.
#[allow(dead_code)]
pub async fn spawn_mock_service(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
