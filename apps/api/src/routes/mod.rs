pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/ai",
            post(handlers::handle_ai_recommendations),
        )
        // Catalog
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        .route("/api/v1/careers/:id", get(handlers::handle_get_career))
        .with_state(state)
}
