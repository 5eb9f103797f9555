//! Relevance scoring: four weighted sub-scores, a theme-alignment boost and the
//! consistency penalty folded into one `final_score` in [0, 100].

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::catalog::{CareerRecord, ExperienceLevel};
use crate::models::profile::{SalaryRange, UserProfile};
use crate::recommendation::classifier::FieldAssignment;
use crate::recommendation::fields::{FieldDistance, FieldTables};
use crate::recommendation::keyword_matcher::KeywordMatcher;
use crate::recommendation::resume_insights::{Theme, ThemeDictionary};
use crate::recommendation::settings::{ScoringWeights, ThemeBoostSettings};

/// Sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComponentScores {
    pub skill_overlap: f64,
    pub interest_alignment: f64,
    pub experience_match: f64,
    pub salary_compatibility: f64,
}

impl ComponentScores {
    /// `round(100 * weighted sum)`.
    pub fn raw_score(&self, weights: &ScoringWeights) -> u32 {
        let sum = weights.skill_overlap * self.skill_overlap
            + weights.interest_alignment * self.interest_alignment
            + weights.experience_match * self.experience_match
            + weights.salary_compatibility * self.salary_compatibility;
        (sum * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Boost points and the theme that earned them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeBoost {
    pub points: u32,
    pub theme: Option<Theme>,
}

/// One candidate after scoring. `final_score = clamp(raw + boost - penalty, 0, 100)`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub career: &'a CareerRecord,
    pub career_field: FieldAssignment,
    pub components: ComponentScores,
    pub raw_score: u32,
    pub boost: ThemeBoost,
    pub penalty: u32,
    pub final_score: u32,
}

impl ScoredCandidate<'_> {
    pub fn apply(&mut self, boost: ThemeBoost, penalty: u32) {
        self.boost = boost;
        self.penalty = penalty;
        let total = self.raw_score as i64 + boost.points as i64 - penalty as i64;
        self.final_score = total.clamp(0, 100) as u32;
    }
}

/// `|user ∩ required| / max(|user|, |required|)`, 0 when either side is empty.
pub fn skill_overlap(user_skills: &BTreeSet<String>, required: &HashSet<String>) -> f64 {
    let denominator = user_skills.len().max(required.len());
    if user_skills.is_empty() || required.is_empty() {
        return 0.0;
    }
    let shared = user_skills.iter().filter(|s| required.contains(*s)).count();
    shared as f64 / denominator as f64
}

/// Fraction of the user's interests found as whole words in `text`.
pub fn interest_alignment(interests: &KeywordMatcher, text: &str) -> f64 {
    if interests.is_empty() {
        return 0.0;
    }
    interests.distinct_count(text) as f64 / interests.len() as f64
}

/// 1 for the same level, 0.5 for adjacent levels, else 0.
pub fn experience_match(user: ExperienceLevel, career: ExperienceLevel) -> f64 {
    match user.rank().abs_diff(career.rank()) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

/// Career salary range widened by `tolerance` on both sides.
pub fn salary_window(career: &CareerRecord, tolerance: f64) -> (f64, f64) {
    (
        career.min_salary as f64 * (1.0 - tolerance),
        career.max_salary as f64 * (1.0 + tolerance),
    )
}

/// 1 when the user is flexible or overlaps the widened career range. Outside it the
/// score falls off linearly to 0 across a further `tolerance` of the nearer bound.
pub fn salary_compatibility(user: SalaryRange, career: &CareerRecord, tolerance: f64) -> f64 {
    if user.is_flexible() {
        return 1.0;
    }
    let (floor, ceiling) = salary_window(career, tolerance);
    let (gap, window) = if (user.max as f64) < floor {
        (floor - user.max as f64, tolerance * career.min_salary as f64)
    } else if user.min as f64 > ceiling {
        (user.min as f64 - ceiling, tolerance * career.max_salary as f64)
    } else {
        return 1.0;
    };

    if window <= 0.0 {
        return 0.0;
    }
    (1.0 - gap / window).max(0.0)
}

pub fn component_scores(
    profile: &UserProfile,
    career: &CareerRecord,
    interests: &KeywordMatcher,
    salary_tolerance: f64,
) -> ComponentScores {
    ComponentScores {
        skill_overlap: skill_overlap(&profile.all_skills(), &career.required_skills()),
        interest_alignment: interest_alignment(interests, &career.searchable_text()),
        experience_match: experience_match(profile.seniority, career.experience_level),
        salary_compatibility: salary_compatibility(
            profile.salary_expectation,
            career,
            salary_tolerance,
        ),
    }
}

/// Boost for careers in or next to the dominant theme's field, plus a title mention bonus.
pub fn theme_boost(
    profile: &UserProfile,
    career: &CareerRecord,
    career_field: &FieldAssignment,
    tables: &FieldTables,
    themes: &ThemeDictionary,
    settings: &ThemeBoostSettings,
) -> ThemeBoost {
    let Some(theme) = profile.resume_insights.dominant_theme else {
        return ThemeBoost::default();
    };

    let mut points = match tables.distance(theme.owning_field(), career_field.field) {
        FieldDistance::Same => settings.same_field,
        FieldDistance::Related => settings.related_field,
        FieldDistance::TwoHops | FieldDistance::Distant => 0,
    };
    if themes.mentions(theme, &career.title) {
        points += settings.title_mention;
    }

    let points = points.min(settings.cap);
    ThemeBoost {
        points,
        theme: (points > 0).then_some(theme),
    }
}
