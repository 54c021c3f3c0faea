//! The inactivity sweep.
//!
//! One sweep lists every user, looks up each user's latest completed run
//! and, for users over the inactivity threshold with no reminder inside the
//! cooldown window, writes a new `inactiveReminder` notification.
//!
//! Only a failure to list users is fatal. Any store error while handling a
//! single user is logged and counted, and the sweep moves on.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use serde::Serialize;

use stride_core::config::SweepConfig;
use stride_core::result::AppResult;
use stride_entity::notification::{NewNotification, NotificationKind};
use stride_entity::user::User;
use stride_store::StoreProvider;

use crate::policy::{InactivityPolicy, days_since};

/// What happened to one user during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOutcome {
    /// Ran recently enough; nothing to do.
    Active {
        /// Days since the last completed run.
        days: i64,
    },
    /// Inactive, but already reminded inside the cooldown window.
    RecentlyReminded,
    /// Inactive and a reminder was written.
    Reminded,
    /// A store call failed for this user.
    Failed,
}

/// Counters for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Users returned by the user store.
    pub users_checked: usize,
    /// Reminders written.
    pub notifications_sent: usize,
    /// Users under the inactivity threshold.
    pub skipped_active: usize,
    /// Inactive users already reminded inside the cooldown window.
    pub skipped_recently_reminded: usize,
    /// Users whose processing hit a store error.
    pub failed: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: UserOutcome) {
        match outcome {
            UserOutcome::Active { .. } => self.skipped_active += 1,
            UserOutcome::RecentlyReminded => self.skipped_recently_reminded += 1,
            UserOutcome::Reminded => self.notifications_sent += 1,
            UserOutcome::Failed => self.failed += 1,
        }
    }

    /// Human-readable result line.
    pub fn message(&self) -> String {
        format!(
            "Checked {} users, sent {} notifications",
            self.users_checked, self.notifications_sent
        )
    }
}

/// Runs inactivity sweeps against a store.
#[derive(Debug, Clone)]
pub struct InactivitySweep {
    store: Arc<dyn StoreProvider>,
    policy: InactivityPolicy,
    concurrency: usize,
}

impl InactivitySweep {
    /// Create a sweep over `store` using the `[sweep]` settings.
    pub fn new(store: Arc<dyn StoreProvider>, config: &SweepConfig) -> Self {
        Self {
            store,
            policy: InactivityPolicy::from_config(config),
            concurrency: config.concurrency.max(1),
        }
    }

    /// The store this sweep reads and writes.
    pub fn store(&self) -> &Arc<dyn StoreProvider> {
        &self.store
    }

    /// Run one sweep at the current time.
    pub async fn run(&self) -> AppResult<SweepSummary> {
        self.run_at(Utc::now()).await
    }

    /// Run one sweep as of `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> AppResult<SweepSummary> {
        tracing::info!(
            store = self.store.provider_type(),
            threshold_days = self.policy.threshold_days,
            cooldown_days = self.policy.cooldown_days,
            "Starting inactivity sweep"
        );

        let users = self.store.list_users().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list users, aborting sweep");
        })?;
        tracing::info!("Checking {} users", users.len());

        let mut summary = SweepSummary {
            users_checked: users.len(),
            ..Default::default()
        };

        if self.concurrency == 1 {
            for user in &users {
                summary.record(self.check_user(user, now).await);
            }
        } else {
            let outcomes: Vec<UserOutcome> = stream::iter(users.iter().cloned())
                .map(|user| {
                    let this = self.clone();
                    async move { this.check_user(&user, now).await }
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;
            for outcome in outcomes {
                summary.record(outcome);
            }
        }

        tracing::info!(
            users_checked = summary.users_checked,
            notifications_sent = summary.notifications_sent,
            skipped_active = summary.skipped_active,
            skipped_recently_reminded = summary.skipped_recently_reminded,
            failed = summary.failed,
            "Inactivity sweep finished"
        );
        Ok(summary)
    }

    /// Resolve a single user. Store errors become [`UserOutcome::Failed`].
    pub async fn check_user(&self, user: &User, now: DateTime<Utc>) -> UserOutcome {
        match self.evaluate(user, now).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    username = %user.handle(),
                    error = %e,
                    "Failed to process user"
                );
                UserOutcome::Failed
            }
        }
    }

    async fn evaluate(&self, user: &User, now: DateTime<Utc>) -> AppResult<UserOutcome> {
        let latest = self.store.latest_completed_session(user.id).await?;
        let days = days_since(now, latest.map(|s| s.start_time));

        if !self.policy.is_inactive(days) {
            tracing::debug!(user_id = %user.id, days, "User is active");
            return Ok(UserOutcome::Active { days });
        }

        let recent = self
            .store
            .recent_notifications(
                user.id,
                NotificationKind::InactiveReminder,
                self.policy.cooldown_start(now)?,
            )
            .await?;
        if !recent.is_empty() {
            tracing::info!(
                user_id = %user.id,
                username = %user.handle(),
                days,
                "Skipping user, reminded recently"
            );
            return Ok(UserOutcome::RecentlyReminded);
        }

        self.store
            .insert_notification(&NewNotification::inactive_reminder(user.id, now))
            .await?;
        tracing::info!(
            user_id = %user.id,
            username = %user.handle(),
            days,
            "Sent inactivity reminder"
        );
        Ok(UserOutcome::Reminded)
    }
}
