//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured `log_level`. Production logs are
/// JSON lines; everything else gets the human-readable format.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}
