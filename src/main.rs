//! Planboard HTTP server.

use std::error::Error;

use tokio::net::TcpListener;
use tracing::{info, warn};

use planboard::adapters::{app_router, AppServices};
use planboard::config::AppConfig;
use planboard::ports::SchemaManager;
use planboard::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        database = config.database.redacted_target(),
        "Starting planboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    let services = AppServices::from_config(&config).await?;

    if config.database.run_migrations {
        services.schema.ensure_schema().await?;
    } else if config.server.is_development() {
        warn!("Migrations disabled; call /api/init_db to create the schema");
    }

    if !config.server.static_dir.join("index.html").exists() {
        warn!(
            static_dir = %config.server.static_dir.display(),
            "No index.html in static directory; the frontend will not be served"
        );
    }

    let app = app_router(&services, &config);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
