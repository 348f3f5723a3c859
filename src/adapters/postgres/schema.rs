//! Embedded migrations.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::domain::foundation::DomainError;
use crate::ports::SchemaManager;

/// Applies the embedded SQL migrations to the connected database.
#[derive(Clone)]
pub struct PostgresSchema {
    pool: PgPool,
}

impl PostgresSchema {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaManager for PostgresSchema {
    async fn ensure_schema(&self) -> Result<(), DomainError> {
        info!("Running database migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to run migrations", e))?;

        info!("Database migrations completed");
        Ok(())
    }
}
