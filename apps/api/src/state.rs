use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::recommendation::engine::RecommendationEngine;
use crate::recommendation::recommender::Recommender;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<Catalog>,
    pub engine: Arc<RecommendationEngine>,
    /// Pluggable recommendation backend. Default: CatalogRecommender.
    pub recommender: Arc<dyn Recommender>,
}
