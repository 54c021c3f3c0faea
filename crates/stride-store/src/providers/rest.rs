//! Hosted PostgREST store provider.
//!
//! Tables are addressed as `{url}/rest/v1/{table}`; filters use the
//! PostgREST operator syntax (`user_id=eq.<id>`, `created_at=gte.<ts>`).
//! Every request carries the service key both as `apikey` and as a bearer
//! token.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use stride_core::config::StoreConfig;
use stride_core::error::{AppError, ErrorKind};
use stride_core::result::AppResult;
use stride_core::types::{NotificationId, UserId};
use stride_entity::activity::{SessionStart, SessionStatus};
use stride_entity::notification::{NewNotification, NotificationKind};
use stride_entity::user::User;

use crate::provider::StoreProvider;

/// Rows requested per page when listing users. Hosted projects cap
/// responses at 1000 rows by default.
const USER_PAGE_SIZE: usize = 1000;

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: NotificationId,
}

/// Store provider that talks to the hosted project over HTTPS.
#[derive(Debug, Clone)]
pub struct RestStoreProvider {
    client: Client,
    base_url: String,
}

impl RestStoreProvider {
    /// Build a client from the store configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::configuration("Store endpoint is empty"));
        }
        Url::parse(&base_url)
            .map_err(|e| AppError::configuration(format!("Invalid store endpoint '{base_url}': {e}")))?;

        let key = HeaderValue::from_str(config.service_key.trim())
            .map_err(|_| AppError::configuration("Store credential is not a valid header value"))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key.trim()))
            .map_err(|_| AppError::configuration("Store credential is not a valid header value"))?;
        let schema = HeaderValue::from_str(&config.schema)
            .map_err(|_| AppError::configuration("Store schema is not a valid header value"))?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(HeaderName::from_static("accept-profile"), schema.clone());
        headers.insert(HeaderName::from_static("content-profile"), schema);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self { client, base_url })
    }

    /// URL of a table endpoint with the given query parameters.
    fn table_url(&self, table: &str, params: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/rest/v1/{table}", self.base_url))
            .map_err(|e| AppError::internal(format!("Invalid table URL for '{table}': {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET a table and decode the JSON array of rows.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let url = self.table_url(table, params)?;
        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Request to '{table}' failed: {e}"),
                e,
            )
        })?;

        let response = check_status(table, response).await?;
        response.json::<Vec<T>>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to decode '{table}' rows: {e}"),
                e,
            )
        })
    }
}

/// Turn a non-success response into an error carrying the store's message.
async fn check_status(table: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => {
            let mut message = err.message;
            if let Some(code) = err.code {
                message = format!("{message} (code {code})");
            }
            if let Some(hint) = err.hint {
                message = format!("{message}; hint: {hint}");
            }
            message
        }
        Err(_) if body.trim().is_empty() => format!("'{table}' request failed with HTTP {status}"),
        Err(_) => body,
    };

    let kind = if status.is_server_error() {
        ErrorKind::ServiceUnavailable
    } else {
        ErrorKind::ExternalService
    };
    Err(AppError::new(kind, message))
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl StoreProvider for RestStoreProvider {
    fn provider_type(&self) -> &str {
        "rest"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.select::<serde_json::Value>(
            "users",
            &[("select", "id".to_string()), ("limit", "1".to_string())],
        )
        .await
        .map(|_| true)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users = Vec::new();
        loop {
            let page: Vec<User> = self
                .select(
                    "users",
                    &[
                        ("select", "id,full_name,username".to_string()),
                        ("order", "id.asc".to_string()),
                        ("limit", USER_PAGE_SIZE.to_string()),
                        ("offset", users.len().to_string()),
                    ],
                )
                .await?;
            let last_page = page.len() < USER_PAGE_SIZE;
            users.extend(page);
            if last_page {
                return Ok(users);
            }
        }
    }

    async fn latest_completed_session(&self, user_id: UserId) -> AppResult<Option<SessionStart>> {
        let rows: Vec<SessionStart> = self
            .select(
                "run_sessions",
                &[
                    ("select", "start_time".to_string()),
                    ("user_id", eq(user_id)),
                    ("status", eq(SessionStatus::Completed)),
                    ("order", "start_time.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn recent_notifications(
        &self,
        user_id: UserId,
        kind: NotificationKind,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<NotificationId>> {
        let rows: Vec<IdRow> = self
            .select(
                "notifications",
                &[
                    ("select", "id".to_string()),
                    ("user_id", eq(user_id)),
                    ("type", eq(kind)),
                    (
                        "created_at",
                        format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Millis, true)),
                    ),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn insert_notification(&self, notification: &NewNotification) -> AppResult<()> {
        let url = self.table_url("notifications", &[])?;
        let response = self
            .client
            .post(url)
            .header("prefer", "return=minimal")
            .json(notification)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Request to 'notifications' failed: {e}"),
                    e,
                )
            })?;

        check_status("notifications", response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> RestStoreProvider {
        RestStoreProvider::new(&StoreConfig {
            url: "https://project.supabase.co/".to_string(),
            service_key: "service-role-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_table_url_encodes_filters() {
        let since = DateTime::parse_from_rfc3339("2024-06-01T08:30:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let url = provider()
            .table_url(
                "notifications",
                &[
                    ("select", "id".to_string()),
                    (
                        "created_at",
                        format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Millis, true)),
                    ),
                ],
            )
            .unwrap();

        assert_eq!(url.path(), "/rest/v1/notifications");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("select".to_string(), "id".to_string()));
        assert_eq!(
            pairs[1],
            (
                "created_at".to_string(),
                "gte.2024-06-01T08:30:00.000Z".to_string()
            )
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let result = RestStoreProvider::new(&StoreConfig {
            url: "not a url".to_string(),
            service_key: "key".to_string(),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq(SessionStatus::Completed), "eq.completed");
        assert_eq!(eq(NotificationKind::InactiveReminder), "eq.inactiveReminder");
    }
}
