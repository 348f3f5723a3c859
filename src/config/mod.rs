//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PLANBOARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use planboard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Plain environment variables that seed `database.url`, in priority order.
const LEGACY_DATABASE_URL_VARS: [&str; 2] = ["NEON_URL", "DATABASE_URL"];

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, static files)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session cookie and password hashing configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds `database.url` from `NEON_URL` or `DATABASE_URL`
    /// 3. Reads environment variables with `PLANBOARD` prefix, which win
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLANBOARD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLANBOARD__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(url) = legacy_database_url() {
            builder = builder.set_default("database.url", url)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("PLANBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if !self.uses_in_memory_storage() {
            self.database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Development without a database URL runs on throwaway in-memory storage.
    pub fn uses_in_memory_storage(&self) -> bool {
        self.server.is_development() && self.database.url.is_empty()
    }
}

fn legacy_database_url() -> Option<String> {
    LEGACY_DATABASE_URL_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "PLANBOARD__DATABASE__URL",
        "PLANBOARD__SERVER__PORT",
        "PLANBOARD__SERVER__ENVIRONMENT",
        "PLANBOARD__AUTH__COOKIE_SECURE",
        "NEON_URL",
        "DATABASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PLANBOARD__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_database_url_fallback() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DATABASE_URL", "postgres://fallback@localhost/app");
        env::set_var("NEON_URL", "postgres://neon@localhost/app");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().database.url, "postgres://neon@localhost/app");
    }

    #[test]
    fn test_prefixed_url_overrides_legacy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DATABASE_URL", "postgres://fallback@localhost/app");
        env::set_var("PLANBOARD__DATABASE__URL", "postgres://primary@localhost/app");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().database.url, "postgres://primary@localhost/app");
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PLANBOARD__DATABASE__URL", "postgresql://test@localhost/test");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_production_requires_secure_cookie() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PLANBOARD__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("PLANBOARD__SERVER__ENVIRONMENT", "production");
        let insecure = AppConfig::load();
        env::set_var("PLANBOARD__AUTH__COOKIE_SECURE", "true");
        let secure = AppConfig::load();
        clear_env();

        let insecure = insecure.unwrap();
        assert!(insecure.is_production());
        assert!(insecure.validate().is_err());
        assert!(secure.unwrap().validate().is_ok());
    }

    #[test]
    fn test_development_without_database_url_uses_memory() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.database.url.is_empty());
        assert!(config.uses_in_memory_storage());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_without_database_url_is_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PLANBOARD__SERVER__ENVIRONMENT", "production");
        env::set_var("PLANBOARD__AUTH__COOKIE_SECURE", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(!config.uses_in_memory_storage());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PLANBOARD__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }
}
