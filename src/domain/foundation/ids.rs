//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length of a user identifier (UUID text form).
pub const USER_ID_MAX_LEN: usize = 36;

/// Maximum length of a planner item identifier.
pub const ITEM_ID_MAX_LEN: usize = 50;

/// Unique identifier for a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId, returning error if empty or too long.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if id.len() > USER_ID_MAX_LEN {
            return Err(ValidationError::too_long("user_id", USER_ID_MAX_LEN));
        }
        Ok(Self(id))
    }

    /// Creates a fresh random UserId (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a task, goal, reminder or habit.
///
/// Clients usually pick the id themselves (a millisecond timestamp), so the
/// value is kept as opaque text rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an ItemId, returning error if empty or longer than 50 chars.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("id"));
        }
        if id.chars().count() > ITEM_ID_MAX_LEN {
            return Err(ValidationError::too_long("id", ITEM_ID_MAX_LEN));
        }
        Ok(Self(id))
    }

    /// Creates a fresh random ItemId (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Resolves the id carried by a request payload.
    ///
    /// Strings and numbers are used verbatim (numbers in their JSON decimal
    /// form). A missing id, `null`, `false`, `0` or `""` yields a generated id.
    pub fn from_payload(value: Option<&Value>) -> Result<Self, ValidationError> {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(Self::generate()),
            Some(Value::String(s)) if s.is_empty() => Ok(Self::generate()),
            Some(Value::String(s)) => Self::new(s.clone()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(Self::generate()),
            Some(Value::Number(n)) => Self::new(n.to_string()),
            Some(_) => Err(ValidationError::invalid_format(
                "id",
                "must be a string or a number",
            )),
        }
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
