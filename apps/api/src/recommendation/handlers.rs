use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info_span, warn, Instrument};
use uuid::Uuid;

use crate::catalog::CareerRecord;
use crate::errors::AppError;
use crate::models::profile::ProfileInput;
use crate::models::recommendation::RecommendationResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CareerListResponse {
    pub careers: Vec<CareerRecord>,
    pub total_count: usize,
}

/// A `null` body is the one input the engine cannot default.
fn require_profile(body: Option<ProfileInput>) -> Result<ProfileInput, AppError> {
    body.ok_or_else(|| AppError::Validation("Request body must be a profile object".to_string()))
}

async fn recommend(
    state: &AppState,
    profile: ProfileInput,
    route: &'static str,
) -> Result<Json<RecommendationResponse>, AppError> {
    let level = profile
        .exploration_level
        .or(Some(state.config.default_exploration_level));
    let span = info_span!(
        "recommend",
        request_id = %Uuid::new_v4(),
        route,
        backend = state.recommender.backend()
    );
    let response = state
        .recommender
        .recommend(&profile, level)
        .instrument(span)
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(body): Json<Option<ProfileInput>>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let profile = require_profile(body)?;
    recommend(&state, profile, "recommendations").await
}

/// POST /api/v1/recommendations/ai
///
/// No generative backend is wired in; this serves the deterministic catalog path.
pub async fn handle_ai_recommendations(
    State(state): State<AppState>,
    Json(body): Json<Option<ProfileInput>>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let profile = require_profile(body)?;
    warn!("AI recommendations requested but no generative backend is available; using the catalog scorer");
    recommend(&state, profile, "recommendations_ai").await
}

/// GET /api/v1/careers
pub async fn handle_list_careers(
    State(state): State<AppState>,
) -> Result<Json<CareerListResponse>, AppError> {
    let careers: Vec<CareerRecord> = state
        .catalog
        .records()
        .iter()
        .map(|career| state.engine.with_career_field(career))
        .collect();
    Ok(Json(CareerListResponse {
        total_count: careers.len(),
        careers,
    }))
}

/// GET /api/v1/careers/:id
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(career_id): Path<String>,
) -> Result<Json<CareerRecord>, AppError> {
    state
        .catalog
        .get(&career_id)
        .map(|career| Json(state.engine.with_career_field(career)))
        .ok_or_else(|| AppError::NotFound(format!("Career '{career_id}' not found")))
}
