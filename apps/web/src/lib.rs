pub mod config;
pub mod error;
pub mod routes;
pub mod views;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

/// Build the router for the given configuration.
pub fn app(config: AppConfig) -> Router {
    let max_body = config.max_body_bytes;
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(routes::deck::form).post(routes::deck::convert))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
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

    let config = AppConfig::from_env();
    let addr = format!("{}:{}", config.host, config.port);
    let app = app(config);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
