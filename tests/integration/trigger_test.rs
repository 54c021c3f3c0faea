//! Integration tests for the inactivity sweep trigger.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};

use stride_core::error::AppError;
use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_entity::activity::SessionStart;
use stride_entity::notification::{NewNotification, NotificationKind};
use stride_entity::user::User;
use stride_store::{MemoryStoreProvider, StoreProvider};

const TRIGGER: &str = "/api/check-inactive-users";

#[tokio::test]
async fn test_options_short_circuits() {
    let app = helpers::TestApp::new();
    app.user("lapsed").await;

    let response = app.request("OPTIONS", TRIGGER).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "ok");
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        response.header("access-control-allow-headers"),
        Some("authorization, x-client-info, apikey, content-type")
    );
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_empty_store() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", TRIGGER).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({
            "success": true,
            "message": "Checked 0 users, sent 0 notifications",
            "notificationsSent": 0,
        })
    );
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert!(
        response
            .header("content-type")
            .is_some_and(|v| v.starts_with("application/json"))
    );
}

#[tokio::test]
async fn test_mixed_population_sends_one_reminder() {
    let app = helpers::TestApp::new();
    let ran_today = app.user_with_run("alice", Duration::hours(2)).await;
    let lapsed = app.user_with_run("bob", Duration::days(5)).await;
    let recently_reminded = app.user_with_run("carol", Duration::days(10)).await;
    app.reminded_at(&recently_reminded, Utc::now() - Duration::days(2))
        .await;

    let response = app.request("POST", TRIGGER).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["message"],
        "Checked 3 users, sent 1 notifications"
    );
    assert_eq!(response.body["notificationsSent"], 1);

    assert!(app.store.notifications_for(ran_today.id).await.is_empty());
    assert_eq!(app.store.notifications_for(recently_reminded.id).await.len(), 1);
    let sent = app.store.notifications_for(lapsed.id).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, "inactiveReminder");
    assert!(!sent[0].is_read);
}

#[tokio::test]
async fn test_any_method_runs_the_sweep() {
    let app = helpers::TestApp::new();
    app.user("never-ran").await;

    let response = app.request("GET", TRIGGER).await;
    assert_eq!(response.body["notificationsSent"], 1);

    let response = app.request("PUT", TRIGGER).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["notificationsSent"], 0);
    assert_eq!(app.store.notification_count().await, 1);
}

/// Store whose user listing always fails.
#[derive(Debug, Default)]
struct UnreachableUsers {
    inner: MemoryStoreProvider,
}

#[async_trait]
impl StoreProvider for UnreachableUsers {
    fn provider_type(&self) -> &str {
        "unreachable"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Err(AppError::service_unavailable("Invalid API key"))
    }

    async fn latest_completed_session(&self, user_id: UserId) -> AppResult<Option<SessionStart>> {
        self.inner.latest_completed_session(user_id).await
    }

    async fn recent_notifications(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>> {
        self.inner.recent_notifications(user_id, kind, since).await
    }

    async fn insert_notification(&self, notification: &NewNotification) -> AppResult<()> {
        self.inner.insert_notification(notification).await
    }
}

#[tokio::test]
async fn test_user_listing_failure_returns_500() {
    let store = UnreachableUsers::default();
    let inner = store.inner.clone();
    let app = helpers::TestApp::with_store(Arc::new(store));

    let response = app.request("POST", TRIGGER).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, serde_json::json!({"error": "Invalid API key"}));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(inner.notification_count().await, 0);
}
