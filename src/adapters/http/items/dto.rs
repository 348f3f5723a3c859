//! HTTP DTOs for item endpoints.
//!
//! Item bodies are free-form JSON objects; their shape is decided by the
//! item kind, so only the envelopes are typed here.

use serde::Serialize;

/// Response to a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct ItemCreatedResponse {
    pub success: bool,
    pub id: String,
}

impl ItemCreatedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
        }
    }
}
