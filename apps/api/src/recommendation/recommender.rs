//! Recommender backends behind one async trait.
//!
//! `AppState` holds an `Arc<dyn Recommender>`. `CatalogRecommender` is the only
//! backend: deterministic catalog-and-scorer recommendations, no external calls.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::profile::ProfileInput;
use crate::models::recommendation::RecommendationResponse;
use crate::recommendation::engine::RecommendationEngine;

/// Implement this to swap recommendation backends without touching handlers.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(
        &self,
        profile: &ProfileInput,
        exploration_level: Option<i64>,
    ) -> Result<RecommendationResponse, AppError>;

    /// Short label for logs: "catalog" | ...
    fn backend(&self) -> &'static str;
}

/// Scores the shared catalog with the shared engine.
#[derive(Debug, Clone)]
pub struct CatalogRecommender {
    engine: Arc<RecommendationEngine>,
    catalog: Arc<Catalog>,
}

impl CatalogRecommender {
    pub fn new(engine: Arc<RecommendationEngine>, catalog: Arc<Catalog>) -> Self {
        Self { engine, catalog }
    }
}

#[async_trait]
impl Recommender for CatalogRecommender {
    async fn recommend(
        &self,
        profile: &ProfileInput,
        exploration_level: Option<i64>,
    ) -> Result<RecommendationResponse, AppError> {
        let response = self
            .engine
            .get_recommendations(profile, &self.catalog, exploration_level);
        info!(
            "Recommendations generated: {} (safe={}, stretch={}, adventure={})",
            response.total_count,
            response.categories.safe,
            response.categories.stretch,
            response.categories.adventure
        );
        debug!("Returned careers: {:?}", response.career_ids());
        Ok(response)
    }

    fn backend(&self) -> &'static str {
        "catalog"
    }
}
