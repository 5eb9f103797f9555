mod catalog;
mod config;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::recommendation::engine::RecommendationEngine;
use crate::recommendation::recommender::CatalogRecommender;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    let engine = RecommendationEngine::from_settings_path(config.engine_settings_path.as_deref())
        .context("Failed to build recommendation engine")?;
    let engine = Arc::new(engine);

    let catalog = Catalog::load(config.catalog_path.as_deref())
        .context("Failed to load career catalog")?;
    let catalog = Arc::new(catalog);

    let recommender = Arc::new(CatalogRecommender::new(engine.clone(), catalog.clone()));

    let state = AppState {
        config: config.clone(),
        catalog,
        engine,
        recommender,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
