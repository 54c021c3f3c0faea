//! User repository implementation.

use sqlx::PgPool;

use stride_core::error::{AppError, ErrorKind};
use stride_core::result::AppResult;
use stride_entity::user::User;

/// Read-only access to the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every user identity.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, full_name, username FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Failed to list users: {e}"), e))
    }
}
