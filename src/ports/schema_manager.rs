//! Schema management port, used by the development-only `init_db` endpoint.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Creates the tables the application needs if they don't exist yet.
#[async_trait]
pub trait SchemaManager: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), DomainError>;
}
