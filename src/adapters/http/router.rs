//! Application router.
//!
//! Wires the ports into handlers, mounts every route and applies the
//! cross-cutting layers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::auth::StoreSessionValidator;
use crate::adapters::http::auth::{auth_routes, AuthHandlers};
use crate::adapters::http::cookies::SessionCookie;
use crate::adapters::http::items::{item_routes, ItemHandlers};
use crate::adapters::http::middleware::{session_middleware, SessionAuthState};
use crate::adapters::http::spa::SpaFallback;
use crate::adapters::memory::{
    InMemoryItemRepository, InMemorySchema, InMemorySessionStore, InMemoryUserRepository,
};
use crate::adapters::postgres::{
    PostgresItemRepository, PostgresSchema, PostgresSessionStore, PostgresUserRepository,
};
use crate::application::handlers::auth::{
    InitDbHandler, LoginHandler, LogoutHandler, SignupHandler,
};
use crate::config::{AppConfig, ServerConfig};
use crate::domain::planner::ItemKind;
use crate::ports::{ItemRepository, SchemaManager, SessionStore, SessionValidator, UserRepository};

/// The port implementations the router is built from.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub schema: Arc<dyn SchemaManager>,
}

impl AppServices {
    /// PostgreSQL-backed services sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            items: Arc::new(PostgresItemRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
            schema: Arc::new(PostgresSchema::new(pool)),
        }
    }

    /// Services for the configured storage: PostgreSQL, or in-memory when
    /// running in development without a database URL.
    pub async fn from_config(config: &AppConfig) -> Result<Self, sqlx::Error> {
        if config.uses_in_memory_storage() {
            tracing::warn!("No database URL configured; using in-memory storage, data is lost on restart");
            return Ok(Self::in_memory());
        }
        Ok(Self::postgres(config.database.connect().await?))
    }

    /// Throwaway in-memory services.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            items: Arc::new(InMemoryItemRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            schema: Arc::new(InMemorySchema),
        }
    }
}

/// Builds the full application router.
pub fn app_router(services: &AppServices, config: &AppConfig) -> Router {
    let cookie = SessionCookie::new(config.auth.cookie_name.clone(), config.auth.cookie_secure);
    let validator: Arc<dyn SessionValidator> = Arc::new(StoreSessionValidator::new(
        services.sessions.clone(),
        services.users.clone(),
    ));

    let auth = AuthHandlers::new(
        Arc::new(SignupHandler::new(
            services.users.clone(),
            services.sessions.clone(),
            config.auth.bcrypt_cost,
            config.auth.session_ttl(),
        )),
        Arc::new(LoginHandler::new(
            services.users.clone(),
            services.sessions.clone(),
            config.auth.remember_ttl(),
        )),
        Arc::new(LogoutHandler::new(services.sessions.clone())),
        Arc::new(InitDbHandler::new(
            services.schema.clone(),
            config.server.is_development(),
        )),
        cookie.clone(),
    );

    let router = ItemKind::ALL
        .into_iter()
        .fold(auth_routes(auth), |router, kind| {
            router.merge(item_routes(ItemHandlers::new(kind, services.items.clone())))
        });

    let spa = SpaFallback::new(config.server.static_dir.clone());

    router
        .fallback(move |request: Request| spa.clone().serve(request))
        .layer(middleware::from_fn_with_state(
            SessionAuthState::new(validator, cookie),
            session_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS for configured origins only; cookies need `allow_credentials`,
/// which rules out a wildcard origin.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
