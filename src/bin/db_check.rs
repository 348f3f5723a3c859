//! Database connectivity smoke test.
//!
//! Loads the same configuration as the server, connects, and prints the
//! server version. Exits non-zero when the database cannot be reached.

use std::process::ExitCode;

use tracing::{error, info};

use planboard::config::AppConfig;
use planboard::telemetry::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.server);

    if let Err(e) = config.database.validate() {
        error!("Invalid database configuration: {}", e);
        return ExitCode::FAILURE;
    }

    info!(target_db = config.database.redacted_target(), "Testing database connection");

    let pool = match config.database.connect().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Connection failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(&pool)
        .await
    {
        Ok(version) => {
            info!(%version, "Connection successful");
            pool.close().await;
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Query failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
