//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use stride_core::config::{AppConfig, StoreBackend};
use stride_core::types::UserId;
use stride_entity::activity::ActivitySession;
use stride_entity::notification::NewNotification;
use stride_entity::user::User;
use stride_store::{MemoryStoreProvider, StoreProvider};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// In-memory store backing the app (seed and inspect through this)
    pub store: MemoryStoreProvider,
}

impl TestApp {
    /// Create a test application over an empty in-memory store
    pub fn new() -> Self {
        let store = MemoryStoreProvider::new();
        let router = Self::router_for(Arc::new(store.clone()));
        Self { router, store }
    }

    /// Create a test application over an arbitrary store. `self.store`
    /// is then unrelated to what the app reads.
    pub fn with_store(store: Arc<dyn StoreProvider>) -> Self {
        Self {
            router: Self::router_for(store),
            store: MemoryStoreProvider::new(),
        }
    }

    fn router_for(store: Arc<dyn StoreProvider>) -> Router {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Memory;
        let state = stride_api::AppState::new(Arc::new(config), store);
        stride_api::build_app(state)
    }

    /// Add a user whose last completed run started `ago` before now
    pub async fn user_with_run(&self, username: &str, ago: Duration) -> User {
        let user = self.user(username).await;
        self.store
            .add_session(ActivitySession::completed(user.id, Utc::now() - ago))
            .await;
        user
    }

    /// Add a user without any runs
    pub async fn user(&self, username: &str) -> User {
        let user = User::new(UserId::new(), username, username);
        self.store.add_user(user.clone()).await;
        user
    }

    /// Record an inactivity reminder created at `created_at`
    pub async fn reminded_at(&self, user: &User, created_at: DateTime<Utc>) {
        self.store
            .insert_notification(&NewNotification::inactive_reminder(user.id, created_at))
            .await
            .expect("Failed to seed notification");
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub text: String,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
}

impl TestResponse {
    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
