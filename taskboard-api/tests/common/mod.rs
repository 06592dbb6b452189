/// Common test utilities for integration tests
///
/// Builds the full router over the in-memory backend, so the tests
/// exercise the real routing, extraction, and error mapping without a
/// database.
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, StorageBackend, StorageConfig};
use taskboard_shared::store::memory::MemoryStore;

/// Test context holding the router under test
pub struct TestContext {
    pub app: axum::Router,
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        storage: StorageConfig {
            backend: StorageBackend::Memory,
            database_url: None,
            database_max_connections: 10,
        },
    }
}

impl TestContext {
    /// Router over an empty in-memory store
    pub fn new() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), test_config());
        Self {
            app: build_router(state),
        }
    }

    /// Router over a store seeded with the demo user and sample board
    pub fn with_demo_data() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::with_demo_data()), test_config());
        Self {
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Creates a user via the API and returns its JSON record
pub async fn create_user(ctx: &TestContext, email: &str, name: &str) -> Value {
    let (status, body) = ctx
        .post(
            "/api/users",
            serde_json::json!({ "email": email, "name": name }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "user creation failed: {body}");
    body
}

/// Creates a board via the API and returns its JSON record
pub async fn create_board(ctx: &TestContext, title: &str, user_id: &str) -> Value {
    let (status, body) = ctx
        .post(
            "/api/boards",
            serde_json::json!({ "title": title, "user_id": user_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "board creation failed: {body}");
    body
}

/// Creates a task via the API and returns its JSON record
pub async fn create_task(ctx: &TestContext, title: &str, list_id: &str) -> Value {
    let (status, body) = ctx
        .post(
            "/api/tasks",
            serde_json::json!({ "title": title, "list_id": list_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "task creation failed: {body}");
    body
}

/// Lists of a board via the API, ordered by position
pub async fn board_lists(ctx: &TestContext, board_id: &str) -> Vec<Value> {
    let (status, body) = ctx.get(&format!("/api/lists?board_id={board_id}")).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}

/// Tasks of a list via the API, ordered by position
pub async fn list_tasks(ctx: &TestContext, list_id: &str) -> Vec<Value> {
    let (status, body) = ctx.get(&format!("/api/tasks?list_id={list_id}")).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}
