pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use flashforge_core::{DeckGenerator, ExtractorRegistry, Pipeline, MAX_FILE_BYTES};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::generation::build_generator;
use crate::services::sessions::SessionStore;

/// Room above the file limit so oversized uploads reach the validator.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub pipeline: Arc<Pipeline>,
    pub generator: Arc<dyn DeckGenerator>,
}

impl AppState {
    pub fn new(sessions: SessionStore, pipeline: Pipeline, generator: Arc<dyn DeckGenerator>) -> Self {
        Self {
            sessions: Arc::new(sessions),
            pipeline: Arc::new(pipeline),
            generator,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SessionStore::new(config.session_ttl),
            Pipeline::new(ExtractorRegistry::default(), config.extract_timeout),
            build_generator(config.generation.as_ref()),
        )
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/sessions", post(routes::sessions::create))
        .route("/api/sessions/:id", delete(routes::sessions::delete))
        .route("/api/sessions/:id/upload", post(routes::upload::upload))
        .route("/api/sessions/:id/upload/progress", get(routes::upload::progress))
        .route("/api/sessions/:id/generate", post(routes::generate::generate))
        .route("/api/sessions/:id/card", get(routes::review::current))
        .route("/api/sessions/:id/next", post(routes::review::next))
        .route("/api/sessions/:id/previous", post(routes::review::previous))
        .route("/api/sessions/:id/flip", post(routes::review::flip))
        .route("/api/sessions/:id/export", get(routes::export::download));

    Router::new()
        .route("/health", get(health_check))
        .merge(session_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_FILE_BYTES as usize + BODY_LIMIT_SLACK)),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "loaded configuration");

    let state = AppState::from_config(&config);
    state.sessions.spawn_sweeper(SWEEP_INTERVAL);

    let app = router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
