//! Planner item error types.

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, ValidationError};

/// Errors raised by the generic item handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Item does not exist or belongs to someone else.
    NotFound(ItemId),
    /// An item with this id already exists.
    AlreadyExists(ItemId),
    /// Request body was not a JSON object.
    InvalidPayload(String),
    /// A column value failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ItemError {
    pub fn not_found(id: ItemId) -> Self {
        ItemError::NotFound(id)
    }
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        ItemError::InvalidPayload(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ItemError::Infrastructure(message.into())
    }
    pub fn message(&self) -> String {
        match self {
            ItemError::NotFound(id) => format!("Item not found: {}", id),
            ItemError::AlreadyExists(id) => format!("Item already exists: {}", id),
            ItemError::InvalidPayload(msg) => msg.clone(),
            ItemError::ValidationFailed { message, .. } => message.clone(),
            ItemError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ItemError {}

impl From<ValidationError> for ItemError {
    fn from(err: ValidationError) -> Self {
        ItemError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ItemError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ItemAlreadyExists => match err.details.get("id").map(ItemId::new) {
                Some(Ok(id)) => ItemError::AlreadyExists(id),
                _ => ItemError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed => ItemError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ItemError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_field() {
        let err: ItemError = ValidationError::required("text").into();
        assert_eq!(
            err,
            ItemError::ValidationFailed {
                field: "text".to_string(),
                message: "Field 'text' is required".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_domain_error_maps_to_already_exists() {
        let err = DomainError::new(ErrorCode::ItemAlreadyExists, "dup").with_detail("id", "42");
        assert_eq!(
            ItemError::from(err),
            ItemError::AlreadyExists(ItemId::new("42").unwrap())
        );
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err = DomainError::database("Failed to insert task", "connection reset");
        assert!(matches!(ItemError::from(err), ItemError::Infrastructure(_)));
    }
}
