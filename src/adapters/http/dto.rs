//! Response bodies shared by every endpoint.

use serde::Serialize;

/// `{"error": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }

    pub fn not_found() -> Self {
        Self::new("Not found")
    }
}

/// `{"success": true}`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
