use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CareerRecord;
use crate::recommendation::zones::{Zone, ZoneCounts};

/// A returned career: the catalog record plus its scores, zone and reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Catalog fields, with `career_field` always filled in (explicit or inferred).
    #[serde(flatten)]
    pub career: CareerRecord,
    pub relevance_score: u32,
    pub confidence_level: u32,
    /// Score-derived label; independent of which quota slot the career filled.
    pub zone: Zone,
    pub match_reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub total_count: usize,
    /// Filled quota slots per zone.
    pub categories: ZoneCounts,
    pub generated_at: DateTime<Utc>,
}

impl RecommendationResponse {
    pub fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            total_count: 0,
            categories: ZoneCounts::default(),
            generated_at: Utc::now(),
        }
    }

    pub fn career_ids(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|r| r.career.career_id.as_str())
            .collect()
    }
}
