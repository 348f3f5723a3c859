//! InitDbHandler - Creates the schema on demand in development.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::ports::SchemaManager;

/// Errors from the schema bootstrap endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitDbError {
    /// Schema bootstrap is disabled outside development.
    #[error("Not allowed")]
    NotAllowed,

    #[error("Schema creation failed: {0}")]
    Infrastructure(String),
}

/// Handler for the schema bootstrap endpoint.
pub struct InitDbHandler {
    schema: Arc<dyn SchemaManager>,
    enabled: bool,
}

impl InitDbHandler {
    pub fn new(schema: Arc<dyn SchemaManager>, enabled: bool) -> Self {
        Self { schema, enabled }
    }

    pub async fn handle(&self) -> Result<(), InitDbError> {
        if !self.enabled {
            return Err(InitDbError::NotAllowed);
        }

        self.schema
            .ensure_schema()
            .await
            .map_err(|e| InitDbError::Infrastructure(e.to_string()))?;

        info!("Database initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSchema {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SchemaManager for CountingSchema {
        async fn ensure_schema(&self) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainError::new(ErrorCode::DatabaseError, "boom"));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn runs_schema_when_enabled() {
        let schema = Arc::new(CountingSchema::default());
        InitDbHandler::new(schema.clone(), true).handle().await.unwrap();
        assert_eq!(schema.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refuses_when_disabled() {
        let schema = Arc::new(CountingSchema::default());
        let err = InitDbHandler::new(schema.clone(), false).handle().await.unwrap_err();
        assert_eq!(err, InitDbError::NotAllowed);
        assert_eq!(schema.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn surfaces_schema_failures() {
        let schema = Arc::new(CountingSchema {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let err = InitDbHandler::new(schema, true).handle().await.unwrap_err();
        assert!(matches!(err, InitDbError::Infrastructure(_)));
    }
}
