//! Guardrails: hard filters applied before scoring, and the career-path
//! consistency penalty applied after it.
//!
//! The safety-critical registry is a short enumerated list. A career is gated only
//! when its title names an enumerated life-critical role or its description uses
//! one of that role's duty phrases; generic engineering, design, marketing and
//! trades roles never match.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CareerRecord, ExperienceLevel};
use crate::models::profile::UserProfile;
use crate::recommendation::classifier::FieldAssignment;
use crate::recommendation::fields::{FieldDistance, FieldTables};
use crate::recommendation::keyword_matcher::KeywordMatcher;
use crate::recommendation::resume_insights::{ResumeInsights, Theme};
use crate::recommendation::scoring::salary_window;
use crate::recommendation::settings::{EngineSettings, PenaltySettings};

/// Why a candidate left the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    SafetyCritical,
    OverQualified,
    SalaryOutOfRange,
    QuotaExhausted,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::SafetyCritical => "safety_critical",
            DropReason::OverQualified => "over_qualified",
            DropReason::SalaryOutOfRange => "salary_out_of_range",
            DropReason::QuotaExhausted => "quota_exhausted",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Safety-critical registry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCategory {
    Medical,
    Aviation,
}

/// Raw registry entry before compilation.
#[derive(Debug, Clone)]
pub struct SafetyRoleDefinition {
    pub name: String,
    pub category: SafetyCategory,
    pub title_terms: Vec<String>,
    pub duty_phrases: Vec<String>,
}

impl SafetyRoleDefinition {
    pub fn new(
        name: &str,
        category: SafetyCategory,
        title_terms: &[&str],
        duty_phrases: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            title_terms: title_terms.iter().map(|s| s.to_string()).collect(),
            duty_phrases: duty_phrases.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct SafetyRole {
    name: String,
    category: SafetyCategory,
    title: KeywordMatcher,
    duties: KeywordMatcher,
}

/// Enumerated life-critical roles and the credentials that unlock them.
#[derive(Debug, Clone)]
pub struct SafetyRegistry {
    roles: Vec<SafetyRole>,
    medical_credentials: KeywordMatcher,
    aviation_credentials: KeywordMatcher,
}

/// Healthcare keyword count that marks a résumé as healthcare-themed even when
/// another theme dominates.
const HEALTHCARE_THEME_MIN_COUNT: u32 = 3;

impl SafetyRegistry {
    pub fn new(
        roles: Vec<SafetyRoleDefinition>,
        medical_credentials: &[&str],
        aviation_credentials: &[&str],
    ) -> Result<Self, regex::Error> {
        let roles = roles
            .into_iter()
            .map(|def| {
                Ok(SafetyRole {
                    title: KeywordMatcher::new(&def.title_terms)?,
                    duties: KeywordMatcher::new(&def.duty_phrases)?,
                    name: def.name,
                    category: def.category,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            roles,
            medical_credentials: KeywordMatcher::new(medical_credentials)?,
            aviation_credentials: KeywordMatcher::new(aviation_credentials)?,
        })
    }

    pub fn standard() -> Result<Self, regex::Error> {
        use SafetyCategory::*;
        Self::new(
            vec![
                SafetyRoleDefinition::new(
                    "nurse anesthetist",
                    Medical,
                    &["nurse anesthetist", "crna"],
                    &["administers anesthesia", "administer anesthesia"],
                ),
                SafetyRoleDefinition::new(
                    "anesthesiologist",
                    Medical,
                    &["anesthesiologist"],
                    &["administers anesthesia", "administer anesthesia"],
                ),
                SafetyRoleDefinition::new(
                    "physician",
                    Medical,
                    &["physician", "medical doctor"],
                    &["diagnoses and treats patients", "prescribes medication"],
                ),
                SafetyRoleDefinition::new(
                    "surgeon",
                    Medical,
                    &["surgeon"],
                    &["performs surgery", "performs surgical procedures"],
                ),
                SafetyRoleDefinition::new(
                    "paramedic",
                    Medical,
                    &["paramedic"],
                    &["emergency medical care"],
                ),
                SafetyRoleDefinition::new(
                    "airline pilot",
                    Aviation,
                    &["airline pilot", "commercial pilot", "first officer"],
                    &["pilots commercial aircraft", "flies commercial aircraft"],
                ),
                SafetyRoleDefinition::new(
                    "air traffic controller",
                    Aviation,
                    &["air traffic controller"],
                    &["directs air traffic"],
                ),
            ],
            &[
                "rn", "bsn", "msn", "md", "np", "crna", "emt", "bls", "acls", "pals", "ccrn",
                "nursing license", "registered nurse", "medical license", "board certified",
            ],
            &[
                "atp", "cpl", "faa", "pilot license", "commercial pilot license",
                "instrument rating", "multi-engine rating", "atc certification",
            ],
        )
    }

    /// The matched role's name and category, `None` for ordinary careers.
    pub fn classify(&self, career: &CareerRecord) -> Option<(&str, SafetyCategory)> {
        self.roles
            .iter()
            .find(|role| {
                role.title.contains_any(&career.title)
                    || role.duties.contains_any(&career.description)
            })
            .map(|role| (role.name.as_str(), role.category))
    }

    /// Whether the profile carries the background a `category` role requires.
    pub fn has_background(&self, profile: &UserProfile, category: SafetyCategory) -> bool {
        match category {
            SafetyCategory::Medical => {
                healthcare_themed(&profile.resume_insights)
                    && holds_credential(&self.medical_credentials, profile)
            }
            SafetyCategory::Aviation => holds_credential(&self.aviation_credentials, profile),
        }
    }

    /// True when the career is safety-critical and the user lacks its background.
    pub fn blocks(&self, profile: &UserProfile, career: &CareerRecord) -> bool {
        match self.classify(career) {
            Some((role, category)) if !self.has_background(profile, category) => {
                debug!("{} gated as safety-critical ({role})", career.career_id);
                true
            }
            _ => false,
        }
    }
}

fn healthcare_themed(insights: &ResumeInsights) -> bool {
    insights.dominant_theme == Some(Theme::Healthcare)
        || insights.current_role_theme == Some(Theme::Healthcare)
        || insights.count(Theme::Healthcare) >= HEALTHCARE_THEME_MIN_COUNT
}

fn holds_credential(credentials: &KeywordMatcher, profile: &UserProfile) -> bool {
    profile
        .certifications
        .iter()
        .chain(profile.technical_skills.iter())
        .any(|token| credentials.contains_any(token))
}

// ────────────────────────────────────────────────────────────────────────────
// Pre-scoring filters
// ────────────────────────────────────────────────────────────────────────────

/// First hard filter the candidate fails, in gate order: safety, seniority, salary.
pub fn pre_filter(
    profile: &UserProfile,
    career: &CareerRecord,
    registry: &SafetyRegistry,
    settings: &EngineSettings,
) -> Option<DropReason> {
    if registry.blocks(profile, career) {
        return Some(DropReason::SafetyCritical);
    }

    if profile.experience_years >= settings.senior_user_years
        && career.experience_level == ExperienceLevel::Junior
    {
        return Some(DropReason::OverQualified);
    }

    let salary = profile.salary_expectation;
    if !salary.is_flexible() {
        let (floor, ceiling) = salary_window(career, settings.salary_tolerance);
        if salary.min as f64 > ceiling || (salary.max as f64) < floor {
            return Some(DropReason::SalaryOutOfRange);
        }
    }

    None
}

// ────────────────────────────────────────────────────────────────────────────
// Consistency penalty
// ────────────────────────────────────────────────────────────────────────────

/// Penalty for a career outside the user's field neighbourhood.
pub fn consistency_penalty(
    user_field: &FieldAssignment,
    career_field: &FieldAssignment,
    insights: &ResumeInsights,
    tables: &FieldTables,
    penalties: &PenaltySettings,
) -> u32 {
    match tables.distance(user_field.field, career_field.field) {
        FieldDistance::Same | FieldDistance::Related => 0,
        FieldDistance::TwoHops => penalties.two_hops,
        FieldDistance::Distant => {
            let strength = insights.dominant_strength();
            if strength >= penalties.strong_theme_threshold {
                let extra = strength - penalties.strong_theme_threshold;
                penalties
                    .strong_theme_min
                    .saturating_add(extra)
                    .min(penalties.strong_theme_max)
            } else {
                penalties.unrelated
            }
        }
    }
}
