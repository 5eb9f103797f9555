//! Engine tunables. Every value has a default, so a settings file only needs
//! the keys it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::recommendation::engine::EngineError;
use crate::recommendation::zones::{ZoneDistribution, ZoneThresholds};

/// Weights of the four relevance sub-scores. Must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub skill_overlap: f64,
    pub interest_alignment: f64,
    pub experience_match: f64,
    pub salary_compatibility: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.40,
            interest_alignment: 0.30,
            experience_match: 0.20,
            salary_compatibility: 0.10,
        }
    }
}

impl ScoringWeights {
    fn sum(&self) -> f64 {
        self.skill_overlap + self.interest_alignment + self.experience_match + self.salary_compatibility
    }
}

/// Points added when a career lines up with the user's dominant résumé theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeBoostSettings {
    pub same_field: u32,
    pub related_field: u32,
    pub title_mention: u32,
    pub cap: u32,
}

impl Default for ThemeBoostSettings {
    fn default() -> Self {
        Self {
            same_field: 10,
            related_field: 5,
            title_mention: 5,
            cap: 15,
        }
    }
}

/// Career-path consistency penalties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltySettings {
    pub two_hops: u32,
    pub unrelated: u32,
    pub strong_theme_min: u32,
    pub strong_theme_max: u32,
    /// Dominant-theme count at which the strong-theme penalty takes over.
    pub strong_theme_threshold: u32,
}

impl Default for PenaltySettings {
    fn default() -> Self {
        Self {
            two_hops: 15,
            unrelated: 30,
            strong_theme_min: 45,
            strong_theme_max: 60,
            strong_theme_threshold: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub weights: ScoringWeights,
    pub zone_thresholds: ZoneThresholds,
    pub zone_distribution: ZoneDistribution,
    pub theme_boost: ThemeBoostSettings,
    pub penalties: PenaltySettings,
    /// Fractional widening of a career's salary range before it counts as out of reach.
    pub salary_tolerance: f64,
    /// Users at or above this many years are not offered junior careers.
    pub senior_user_years: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            zone_thresholds: ZoneThresholds::default(),
            zone_distribution: ZoneDistribution::default(),
            theme_boost: ThemeBoostSettings::default(),
            penalties: PenaltySettings::default(),
            salary_tolerance: 0.30,
            senior_user_years: 10,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        let w = &self.weights;
        let weights = [
            w.skill_overlap,
            w.interest_alignment,
            w.experience_match,
            w.salary_compatibility,
        ];
        if weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(EngineError::InvalidSettings(
                "scoring weights must be non-negative".to_string(),
            ));
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidSettings(format!(
                "scoring weights must sum to 1.0 (got {:.3})",
                w.sum()
            )));
        }

        let t = &self.zone_thresholds;
        if t.stretch >= t.safe || t.safe > 100 {
            return Err(EngineError::InvalidSettings(format!(
                "zone thresholds must satisfy stretch < safe <= 100 (got {}/{})",
                t.safe, t.stretch
            )));
        }

        self.zone_distribution
            .validate()
            .map_err(EngineError::InvalidSettings)?;

        let p = &self.penalties;
        if p.strong_theme_min > p.strong_theme_max {
            return Err(EngineError::InvalidSettings(
                "strong_theme_min must not exceed strong_theme_max".to_string(),
            ));
        }

        if !self.salary_tolerance.is_finite() || !(0.0..1.0).contains(&self.salary_tolerance) {
            return Err(EngineError::InvalidSettings(format!(
                "salary_tolerance must be in [0, 1) (got {})",
                self.salary_tolerance
            )));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::SettingsFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(p) => {
                let settings = Self::from_path(p)?;
                info!("Engine settings loaded from {}", p.display());
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }
}
