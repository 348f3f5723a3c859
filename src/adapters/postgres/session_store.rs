//! PostgreSQL implementation of SessionStore.
//!
//! Only the SHA-256 digest of a token is written; the raw token lives in the
//! client's cookie and nowhere else.

use async_trait::async_trait;
use chrono::Duration;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{generate_session_token, session_token_digest, SessionStore};

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn create(&self, user_id: &UserId, ttl: Duration) -> Result<String, DomainError> {
        let token = generate_session_token();
        let expires_at = Timestamp::now().plus(ttl);

        sqlx::query(
            r#"
            INSERT INTO sessions (token_digest, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session_token_digest(&token))
        .bind(user_id.as_str())
        .bind(*expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to create session", e))?;

        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id FROM sessions
            WHERE token_digest = $1 AND expires_at > NOW()
            "#,
        )
        .bind(session_token_digest(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to resolve session", e))?;

        match row {
            Some(row) => {
                let user_id: String = row
                    .try_get("user_id")
                    .map_err(|e| DomainError::database("Failed to read session row", e))?;
                Ok(Some(UserId::new(user_id)?))
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE token_digest = $1")
            .bind(session_token_digest(token))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to revoke session", e))?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to purge sessions", e))?;

        Ok(result.rows_affected())
    }
}
