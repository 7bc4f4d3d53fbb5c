//! User and refresh-token persistence

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::models::User;
use crate::common::{safe_username_log, ApiError};

/// Persistence contract for authentication data.
///
/// Focused on refresh-token management and principal lookup; the SQLite
/// implementation below is the only backend shipped, but handlers and the
/// auth service only ever see the trait.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Store `refresh_token` as the single valid token for `username`,
    /// replacing whatever was there before.
    async fn store_refresh_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<(), ApiError>;

    /// Look up a user by username and currently-stored refresh token.
    async fn find_by_username_and_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<Option<User>, ApiError>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Insert a new user row. Used by provisioning and tests.
    async fn insert(&self, user: &User) -> Result<(), ApiError>;
}

pub struct SqliteAuthRepository {
    db: SqlitePool,
}

impl SqliteAuthRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthRepository for SqliteAuthRepository {
    async fn store_refresh_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE users SET refresh_token = ? WHERE username = ?")
            .bind(refresh_token)
            .bind(username)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!(
                "unknown user: {}",
                safe_username_log(username)
            )));
        }

        debug!(
            username = %safe_username_log(username),
            "Stored refresh token"
        );

        Ok(())
    }

    async fn find_by_username_and_token(
        &self,
        username: &str,
        refresh_token: &str,
    ) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = ? AND refresh_token = ?",
        )
        .bind(username)
        .bind(refresh_token)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    async fn insert(&self, user: &User) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, refresh_token)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.refresh_token.as_deref())
        .execute(&self.db)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ApiError::ValidationError("Username already exists".to_string())
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

        Ok(())
    }
}
