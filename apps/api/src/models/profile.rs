use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ExperienceLevel;
use crate::recommendation::resume_insights::ResumeInsights;

/// Years of experience as sent by clients: a number or a free-text bucket such as `"20+"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceInput {
    Years(i64),
    Bucket(String),
}

/// Salary expectation as sent by clients: `"A-B"`, `"$A - $B"`, `"Ak-Bk"`, or `{min, max}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Range { min: u32, max: u32 },
    Text(String),
}

/// Raw 1..5 preference answers. Missing or out-of-range values are clamped during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceInput {
    pub working_with_data: Option<i64>,
    pub working_with_people: Option<i64>,
    pub creative_tasks: Option<i64>,
    pub problem_solving: Option<i64>,
    pub leadership: Option<i64>,
    pub physical: Option<i64>,
    pub outdoor: Option<i64>,
    pub mechanical_aptitude: Option<i64>,
}

/// Incoming profile. Every field is optional; the normalizer fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub interests: Vec<String>,
    pub industries: Vec<String>,
    pub certifications: Vec<String>,
    pub experience_years: Option<ExperienceInput>,
    pub current_role: Option<String>,
    pub resume_text: Option<String>,
    pub salary_expectation: Option<SalaryInput>,
    #[serde(flatten)]
    pub preferences: PreferenceInput,
    pub exploration_level: Option<i64>,
}

/// Inclusive salary range. `(0, 0)` means the user is flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

impl SalaryRange {
    pub const FLEXIBLE: SalaryRange = SalaryRange { min: 0, max: 0 };
    /// Result of `"flexible"` / `"open"` strings.
    pub const OPEN: SalaryRange = SalaryRange {
        min: 0,
        max: 999_999,
    };
    /// Fallback for strings that cannot be parsed.
    pub const DEFAULT: SalaryRange = SalaryRange {
        min: 50_000,
        max: 200_000,
    };

    /// Builds a range, swapping the bounds when given in the wrong order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn is_flexible(&self) -> bool {
        self.min == 0 && self.max == 0
    }
}

/// Ordinal 1..5 preference scores after clamping; 3 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceScores {
    pub working_with_data: u8,
    pub working_with_people: u8,
    pub creative_tasks: u8,
    pub problem_solving: u8,
    pub leadership: u8,
    pub physical: u8,
    pub outdoor: u8,
    pub mechanical_aptitude: u8,
}

impl Default for PreferenceScores {
    fn default() -> Self {
        Self {
            working_with_data: 3,
            working_with_people: 3,
            creative_tasks: 3,
            problem_solving: 3,
            leadership: 3,
            physical: 3,
            outdoor: 3,
            mechanical_aptitude: 3,
        }
    }
}

impl PreferenceScores {
    /// Mean of the physical, outdoor and mechanical answers.
    pub fn hands_on(&self) -> f64 {
        (self.physical as f64 + self.outdoor as f64 + self.mechanical_aptitude as f64) / 3.0
    }
}

/// Canonical per-request profile produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub technical_skills: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub industries: BTreeSet<String>,
    pub certifications: BTreeSet<String>,
    pub experience_years: u32,
    pub current_role: String,
    pub resume_text: String,
    pub salary_expectation: SalaryRange,
    pub preferences: PreferenceScores,
    /// Level taken from `current_role` markers when present, otherwise bucketed years.
    pub seniority: ExperienceLevel,
    pub resume_insights: ResumeInsights,
}

impl UserProfile {
    /// Union of technical and soft skills.
    pub fn all_skills(&self) -> BTreeSet<String> {
        self.technical_skills
            .union(&self.soft_skills)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_input_accepts_empty_object() {
        let input: ProfileInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, ProfileInput::default());
    }

    #[test]
    fn test_experience_accepts_number_or_bucket() {
        let a: ProfileInput = serde_json::from_str(r#"{"experience_years": 7}"#).unwrap();
        assert_eq!(a.experience_years, Some(ExperienceInput::Years(7)));
        let b: ProfileInput = serde_json::from_str(r#"{"experience_years": "20+"}"#).unwrap();
        assert_eq!(b.experience_years, Some(ExperienceInput::Bucket("20+".to_string())));
    }

    #[test]
    fn test_salary_accepts_string_or_object() {
        let a: ProfileInput =
            serde_json::from_str(r#"{"salary_expectation": "60000-90000"}"#).unwrap();
        assert_eq!(
            a.salary_expectation,
            Some(SalaryInput::Text("60000-90000".to_string()))
        );
        let b: ProfileInput =
            serde_json::from_str(r#"{"salary_expectation": {"min": 1, "max": 2}}"#).unwrap();
        assert_eq!(b.salary_expectation, Some(SalaryInput::Range { min: 1, max: 2 }));
    }

    #[test]
    fn test_preferences_are_flattened() {
        let input: ProfileInput =
            serde_json::from_str(r#"{"leadership": 5, "outdoor": 1}"#).unwrap();
        assert_eq!(input.preferences.leadership, Some(5));
        assert_eq!(input.preferences.outdoor, Some(1));
    }

    #[test]
    fn test_salary_range_swaps_and_flexible() {
        assert_eq!(SalaryRange::new(9, 3), SalaryRange { min: 3, max: 9 });
        assert!(SalaryRange::FLEXIBLE.is_flexible());
        assert!(!SalaryRange::OPEN.is_flexible());
    }
}
