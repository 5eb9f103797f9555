//! Recommendation engine: normalize → classify → filter → score → penalize → zone → explain.
//!
//! All tables are compiled once by the builder and read-only afterwards, so one
//! engine is shared by every request. A call never fails: degraded inputs yield
//! defaults and an empty or short list.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{CareerRecord, Catalog};
use crate::models::profile::ProfileInput;
use crate::models::recommendation::{Recommendation, RecommendationResponse};
use crate::recommendation::classifier::{
    determine_user_career_field, get_career_field, FieldAssignment,
};
use crate::recommendation::explainer::match_reasons;
use crate::recommendation::fields::FieldTables;
use crate::recommendation::guardrails::{consistency_penalty, pre_filter, DropReason, SafetyRegistry};
use crate::recommendation::keyword_matcher::KeywordMatcher;
use crate::recommendation::normalizer::normalize_profile;
use crate::recommendation::resume_insights::ThemeDictionary;
use crate::recommendation::scoring::{component_scores, theme_boost, ScoredCandidate, ThemeBoost};
use crate::recommendation::settings::EngineSettings;
use crate::recommendation::zones::{select, ExplorationLevel, Zone};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid engine settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to read engine settings file {path}: {source}")]
    SettingsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid engine settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostics trace
// ────────────────────────────────────────────────────────────────────────────

/// Last pipeline stage a candidate reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    Accepted,
    Scored,
    Penalized,
    Zoned,
    Returned,
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTrace {
    pub career_id: String,
    pub stage: CandidateStage,
    pub drop_reason: Option<DropReason>,
    pub final_score: Option<u32>,
    pub zone: Option<Zone>,
}

impl CandidateTrace {
    fn accepted(career_id: &str) -> Self {
        Self {
            career_id: career_id.to_string(),
            stage: CandidateStage::Accepted,
            drop_reason: None,
            final_score: None,
            zone: None,
        }
    }

    fn drop(&mut self, reason: DropReason) {
        self.stage = CandidateStage::Dropped;
        self.drop_reason = Some(reason);
    }
}

/// Per-call record of what happened to every catalog entry. Never serialized
/// into the HTTP response.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationTrace {
    pub exploration_level: ExplorationLevel,
    pub user_field: FieldAssignment,
    /// In catalog order.
    pub candidates: Vec<CandidateTrace>,
}

impl RecommendationTrace {
    pub fn drop_counts(&self) -> BTreeMap<DropReason, usize> {
        let mut counts = BTreeMap::new();
        for reason in self.candidates.iter().filter_map(|c| c.drop_reason) {
            *counts.entry(reason).or_default() += 1;
        }
        counts
    }

    /// Candidates that passed every hard filter.
    pub fn survivors(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.final_score.is_some())
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    settings: EngineSettings,
    tables: FieldTables,
    themes: ThemeDictionary,
    safety: SafetyRegistry,
}

#[derive(Debug, Default)]
pub struct RecommendationEngineBuilder {
    settings: Option<EngineSettings>,
    safety: Option<SafetyRegistry>,
}

impl RecommendationEngineBuilder {
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Test seam for swapping the safety-critical role list.
    #[cfg(test)]
    pub fn safety_registry(mut self, safety: SafetyRegistry) -> Self {
        self.safety = Some(safety);
        self
    }

    /// Validates settings and compiles the built-in keyword tables.
    pub fn build(self) -> Result<RecommendationEngine, EngineError> {
        let settings = self.settings.unwrap_or_default();
        settings.validate()?;

        let tables = FieldTables::standard()?;
        let themes = ThemeDictionary::standard()?;
        let safety = match self.safety {
            Some(safety) => safety,
            None => SafetyRegistry::standard()?,
        };

        Ok(RecommendationEngine {
            settings,
            tables,
            themes,
            safety,
        })
    }
}

/// `round(100 * (0.5 * final/100 + 0.25 * career confidence + 0.25 * user confidence))`.
pub fn confidence_level(final_score: u32, career_confidence: f64, user_confidence: f64) -> u32 {
    let blended =
        0.5 * (final_score as f64 / 100.0) + 0.25 * career_confidence + 0.25 * user_confidence;
    (blended * 100.0).round().clamp(0.0, 100.0) as u32
}

impl RecommendationEngine {
    pub fn builder() -> RecommendationEngineBuilder {
        RecommendationEngineBuilder::default()
    }

    /// Engine with the built-in tables and settings from `settings_path`, if any.
    pub fn from_settings_path(settings_path: Option<&Path>) -> Result<Self, EngineError> {
        Self::builder()
            .settings(EngineSettings::load(settings_path)?)
            .build()
    }

    /// Copy of `career` with `career_field` filled in by the classifier.
    pub fn with_career_field(&self, career: &CareerRecord) -> CareerRecord {
        let mut annotated = career.clone();
        annotated.career_field = Some(get_career_field(career, &self.tables).field);
        annotated
    }

    /// Ranked, zoned recommendations. `exploration_level` overrides the profile's own.
    pub fn get_recommendations(
        &self,
        input: &ProfileInput,
        catalog: &Catalog,
        exploration_level: Option<i64>,
    ) -> RecommendationResponse {
        self.recommend_with_trace(input, catalog, exploration_level).0
    }

    pub fn recommend_with_trace(
        &self,
        input: &ProfileInput,
        catalog: &Catalog,
        exploration_level: Option<i64>,
    ) -> (RecommendationResponse, RecommendationTrace) {
        let level = ExplorationLevel::resolve(exploration_level.or(input.exploration_level));
        let quota = self.settings.zone_distribution.quota(level);
        let profile = normalize_profile(input, &self.themes);
        let user_field = determine_user_career_field(&profile, &self.tables);
        let interests = KeywordMatcher::new(&profile.interests).unwrap_or_else(|e| {
            warn!("Ignoring interests that do not compile to a matcher: {e}");
            KeywordMatcher::empty()
        });

        let mut trace = RecommendationTrace {
            exploration_level: level,
            user_field,
            candidates: Vec::with_capacity(catalog.len()),
        };

        if catalog.is_empty() {
            warn!("Career catalog is empty; returning no recommendations");
            return (RecommendationResponse::empty(), trace);
        }

        // (trace position, candidate)
        let mut scored: Vec<(usize, ScoredCandidate<'_>)> = Vec::new();
        for career in catalog.records() {
            let position = trace.candidates.len();
            let mut entry = CandidateTrace::accepted(&career.career_id);

            if let Some(reason) = pre_filter(&profile, career, &self.safety, &self.settings) {
                tracing::trace!("Dropped {}: {}", career.career_id, reason.as_str());
                entry.drop(reason);
                trace.candidates.push(entry);
                continue;
            }

            let career_field = get_career_field(career, &self.tables);
            let components =
                component_scores(&profile, career, &interests, self.settings.salary_tolerance);
            let raw_score = components.raw_score(&self.settings.weights);
            let mut candidate = ScoredCandidate {
                career,
                career_field,
                components,
                raw_score,
                boost: ThemeBoost::default(),
                penalty: 0,
                final_score: raw_score,
            };
            entry.stage = CandidateStage::Scored;

            let boost = theme_boost(
                &profile,
                career,
                &career_field,
                &self.tables,
                &self.themes,
                &self.settings.theme_boost,
            );
            let penalty = consistency_penalty(
                &user_field,
                &career_field,
                &profile.resume_insights,
                &self.tables,
                &self.settings.penalties,
            );
            candidate.apply(boost, penalty);
            entry.stage = CandidateStage::Penalized;
            entry.final_score = Some(candidate.final_score);

            trace.candidates.push(entry);
            scored.push((position, candidate));
        }

        scored.sort_by(|(_, a), (_, b)| {
            b.final_score
                .cmp(&a.final_score)
                .then_with(|| a.career.career_id.cmp(&b.career.career_id))
        });

        let labels: Vec<Zone> = scored
            .iter()
            .map(|(position, c)| {
                let zone = Zone::from_score(c.final_score, &self.settings.zone_thresholds);
                let entry = &mut trace.candidates[*position];
                entry.stage = CandidateStage::Zoned;
                entry.zone = Some(zone);
                zone
            })
            .collect();

        let selection = select(&labels, &quota);
        for pick in selection.picks.iter().filter(|p| p.slot != labels[p.index]) {
            debug!(
                "{} ({}) fills a {} slot",
                scored[pick.index].1.career.career_id,
                labels[pick.index].as_str(),
                pick.slot.as_str()
            );
        }

        let mut recommendations = Vec::with_capacity(selection.picks.len());
        for (rank, (position, candidate)) in scored.iter().enumerate() {
            let entry = &mut trace.candidates[*position];
            if !selection.is_selected(rank) {
                entry.drop(DropReason::QuotaExhausted);
                continue;
            }
            entry.stage = CandidateStage::Returned;

            let mut career = candidate.career.clone();
            career.career_field = Some(candidate.career_field.field);
            recommendations.push(Recommendation {
                career,
                relevance_score: candidate.final_score,
                confidence_level: confidence_level(
                    candidate.final_score,
                    candidate.career_field.confidence,
                    user_field.confidence,
                ),
                zone: labels[rank],
                match_reasons: match_reasons(candidate, &user_field, &self.tables),
            });
        }

        if recommendations.len() < quota.total() {
            warn!(
                "Under-supplied recommendations: {} of {} for exploration level {}",
                recommendations.len(),
                quota.total(),
                level.value()
            );
        }
        debug!(
            "Recommendations: catalog={} survivors={} dropped={:?} user_field={} returned={} {:?}",
            catalog.len(),
            trace.survivors(),
            trace.drop_counts(),
            user_field.field,
            selection.counts.total(),
            selection.counts
        );

        let response = RecommendationResponse {
            total_count: recommendations.len(),
            recommendations,
            categories: selection.counts,
            generated_at: Utc::now(),
        };
        (response, trace)
    }
}
