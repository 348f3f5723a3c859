//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{PasswordHash, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.username())
        .bind(user.email())
        .bind(user.password_hash().as_str())
        .bind(*user.created_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::new(
                    ErrorCode::EmailAlreadyRegistered,
                    format!("Email already registered: {}", user.email()),
                ))
            }
            Err(e) => Err(DomainError::database("Failed to insert user", e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user by email", e))?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch user", e))?;

        row.map(row_to_user).transpose()
    }
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::database("Failed to read user row", e);

    let id: String = row.try_get("id").map_err(read)?;
    let username: String = row.try_get("username").map_err(read)?;
    let email: String = row.try_get("email").map_err(read)?;
    let password_hash: String = row.try_get("password_hash").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;

    Ok(User::reconstitute(
        UserId::new(id)?,
        username,
        email,
        PasswordHash::from_stored(password_hash),
        Timestamp::from_datetime(created_at),
    ))
}
