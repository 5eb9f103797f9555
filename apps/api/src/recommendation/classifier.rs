//! Field classifier: one career-field tag per career and per user, each with a
//! confidence in [0, 1], plus seniority extraction from job titles.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::catalog::{CareerRecord, ExperienceLevel};
use crate::models::profile::UserProfile;
use crate::recommendation::fields::{CareerField, FieldTables};
use crate::recommendation::keyword_matcher::KeywordMatcher;

const EXPLICIT_FIELD_CONFIDENCE: f64 = 0.95;
const FALLBACK_CAREER_CONFIDENCE: f64 = 0.5;
const FALLBACK_USER_CONFIDENCE: f64 = 0.3;

/// A field tag with the classifier's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldAssignment {
    pub field: CareerField,
    pub confidence: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Seniority
// ────────────────────────────────────────────────────────────────────────────

/// Title markers per level, checked from most to least senior.
const SENIORITY_MARKERS: [(ExperienceLevel, &[&str]); 4] = [
    (
        ExperienceLevel::Executive,
        &[
            "ceo", "cto", "cfo", "coo", "cmo", "cpo", "vp", "svp", "evp", "vice president",
            "president", "chief",
        ],
    ),
    (
        ExperienceLevel::Senior,
        &["director", "head of", "principal", "lead", "senior", "sr"],
    ),
    (
        ExperienceLevel::Junior,
        &["junior", "jr", "associate", "assistant", "intern", "entry level", "trainee"],
    ),
    (
        ExperienceLevel::Mid,
        &["manager", "specialist", "coordinator"],
    ),
];

static SENIORITY_MATCHERS: LazyLock<Vec<(ExperienceLevel, KeywordMatcher)>> =
    LazyLock::new(|| {
        SENIORITY_MARKERS
            .iter()
            .map(|(level, markers)| {
                (
                    *level,
                    KeywordMatcher::new(*markers).expect("seniority markers are valid patterns"),
                )
            })
            .collect()
    });

/// Seniority implied by whole-word title markers, `None` when the title has none.
pub fn extract_seniority(title: &str) -> Option<ExperienceLevel> {
    SENIORITY_MATCHERS
        .iter()
        .find(|(_, matcher)| matcher.contains_any(title))
        .map(|(level, _)| *level)
}

// ────────────────────────────────────────────────────────────────────────────
// Career field
// ────────────────────────────────────────────────────────────────────────────

/// Explicit tag when the record has one, otherwise keyword inference over title + description.
pub fn get_career_field(career: &CareerRecord, tables: &FieldTables) -> FieldAssignment {
    if let Some(field) = career.career_field {
        return FieldAssignment {
            field,
            confidence: EXPLICIT_FIELD_CONFIDENCE,
        };
    }
    infer_field(&career.searchable_text(), tables)
}

/// `3 * distinct primary hits + distinct secondary hits` per field; confidence is
/// the winner's margin over the runner-up.
pub fn infer_field(text: &str, tables: &FieldTables) -> FieldAssignment {
    let mut best = (CareerField::Other, 0usize);
    let mut runner_up = 0usize;

    for field in CareerField::ALL {
        let Some(keywords) = tables.keywords(field) else {
            continue;
        };
        let score = 3 * keywords.primary.distinct_count(text) + keywords.secondary.distinct_count(text);
        if score > best.1 {
            runner_up = best.1;
            best = (field, score);
        } else if score > runner_up {
            runner_up = score;
        }
    }

    if best.1 == 0 {
        return FieldAssignment {
            field: CareerField::Other,
            confidence: FALLBACK_CAREER_CONFIDENCE,
        };
    }

    FieldAssignment {
        field: best.0,
        confidence: (best.1 - runner_up) as f64 / best.1 as f64,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// User field
// ────────────────────────────────────────────────────────────────────────────

/// Votes from résumé themes, skills, industries and preferences; the field with
/// the most votes wins and its share of all votes is the confidence.
pub fn determine_user_career_field(profile: &UserProfile, tables: &FieldTables) -> FieldAssignment {
    let votes = user_field_votes(profile, tables);
    let total: u32 = votes.values().sum();

    let winner = CareerField::ALL
        .iter()
        .filter_map(|f| votes.get(f).map(|v| (*f, *v)))
        .fold(None, |best: Option<(CareerField, u32)>, (field, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((field, count)),
        });

    match winner {
        Some((field, count)) if total > 0 => FieldAssignment {
            field,
            confidence: count as f64 / total as f64,
        },
        _ => FieldAssignment {
            field: CareerField::Other,
            confidence: FALLBACK_USER_CONFIDENCE,
        },
    }
}

fn user_field_votes(profile: &UserProfile, tables: &FieldTables) -> BTreeMap<CareerField, u32> {
    let mut votes: BTreeMap<CareerField, u32> = BTreeMap::new();
    let mut vote = |field: CareerField, points: u32| {
        if points > 0 {
            *votes.entry(field).or_default() += points;
        }
    };

    let insights = &profile.resume_insights;
    if let Some(theme) = insights.dominant_theme {
        vote(theme.owning_field(), 4);
    }
    if let Some(theme) = insights.current_role_theme {
        vote(theme.owning_field(), 3);
    }

    for skill in profile.all_skills() {
        for field in CareerField::ALL {
            if let Some(keywords) = tables.keywords(field) {
                if keywords.primary.contains_any(&skill) {
                    vote(field, 2);
                } else if keywords.secondary.contains_any(&skill) {
                    vote(field, 1);
                }
            }
        }
    }

    for industry in &profile.industries {
        for field in CareerField::ALL {
            if let Some(keywords) = tables.keywords(field) {
                if keywords.primary.contains_any(industry) {
                    vote(field, 1);
                }
            }
        }
    }

    let prefs = &profile.preferences;
    if prefs.hands_on() >= 4.0 {
        vote(CareerField::SkilledTrades, 2);
    }
    if prefs.working_with_data >= 4 {
        vote(CareerField::Technology, 1);
    }
    if prefs.leadership >= 4 && profile.seniority == ExperienceLevel::Executive {
        vote(CareerField::ExecutiveLeadership, 2);
    }

    votes
}
