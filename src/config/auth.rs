//! Authentication configuration (session cookies and password hashing)

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Longest accepted lifetime of a regular session (10 years).
pub const MAX_SESSION_TTL_HOURS: u64 = 87_600;

/// Longest accepted lifetime of a remembered login (10 years).
pub const MAX_REMEMBER_DAYS: u64 = 3_650;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Mark the session cookie `Secure` (HTTPS only)
    #[serde(default)]
    pub cookie_secure: bool,

    /// Lifetime of a regular (non-remembered) session in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// Lifetime of a remembered login in days
    #[serde(default = "default_remember_days")]
    pub remember_days: u64,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Server-side lifetime of a session created at signup
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours.min(MAX_SESSION_TTL_HOURS) as i64)
    }

    /// Lifetime of a session created by login (cookie Max-Age too)
    pub fn remember_ttl(&self) -> Duration {
        Duration::days(self.remember_days.min(MAX_REMEMBER_DAYS) as i64)
    }

    /// Validate authentication configuration
    ///
    /// In production, the session cookie must be marked Secure.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.cookie_name.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__COOKIE_NAME"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidBcryptCost);
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours)
            || !(1..=MAX_REMEMBER_DAYS).contains(&self.remember_days)
        {
            return Err(ValidationError::InvalidSessionLifetime);
        }
        if *environment == Environment::Production && !self.cookie_secure {
            return Err(ValidationError::CookieMustBeSecure);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            session_ttl_hours: default_session_ttl_hours(),
            remember_days: default_remember_days(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_cookie_name() -> String {
    "planboard_session".to_string()
}

fn default_session_ttl_hours() -> u64 {
    // 31 days
    744
}

fn default_remember_days() -> u64 {
    365
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}
