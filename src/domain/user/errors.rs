//! Account error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by signup, login and logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Email or password missing from the request.
    MissingFields,
    /// Another account already uses this email.
    EmailAlreadyRegistered,
    /// Unknown email or wrong password.
    InvalidCredentials,
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AccountError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }
    pub fn message(&self) -> String {
        match self {
            AccountError::MissingFields => "Missing fields".to_string(),
            AccountError::EmailAlreadyRegistered => "Email already registered".to_string(),
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::ValidationFailed { message, .. } => message.clone(),
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailAlreadyRegistered => AccountError::EmailAlreadyRegistered,
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}
