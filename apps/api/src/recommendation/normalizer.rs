//! Profile normalizer: coerces an incoming profile into canonical form.
//!
//! Never fails. Unparseable salary strings fall back to `SalaryRange::DEFAULT`,
//! unknown experience buckets to 0 years.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::ExperienceLevel;
use crate::models::profile::{
    ExperienceInput, PreferenceInput, PreferenceScores, ProfileInput, SalaryInput, SalaryRange,
    UserProfile,
};
use crate::recommendation::classifier::extract_seniority;
use crate::recommendation::resume_insights::ThemeDictionary;

/// Machine form: digits around exactly one dash, nothing else.
static MACHINE_SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("valid salary regex"));

/// Legacy form numbers: optional commas and decimals, optional `k` multiplier.
static SALARY_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k)?\b").expect("valid salary number regex")
});

static FLEXIBLE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(flexible|open)\b").expect("valid flexible regex"));

/// Half-width of the window built around a single salary figure.
const SINGLE_FIGURE_WINDOW: u32 = 10_000;

/// Parses a salary expectation string.
///
/// Two numbers: the first is the minimum and the second the maximum; any further
/// numbers are ignored.
pub fn parse_salary(raw: &str) -> SalaryRange {
    let text = raw.trim();
    if text.is_empty() {
        return SalaryRange::FLEXIBLE;
    }

    if FLEXIBLE_WORDS.is_match(text) {
        return SalaryRange::OPEN;
    }

    if let Some(caps) = MACHINE_SALARY.captures(text) {
        if let (Ok(a), Ok(b)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            return SalaryRange::new(a, b);
        }
    }

    let numbers: Vec<u32> = SALARY_NUMBER
        .captures_iter(text)
        .filter_map(|caps| {
            let digits = caps[1].replace(',', "");
            let value: f64 = digits.parse().ok()?;
            let multiplier = if caps.get(2).is_some() { 1_000.0 } else { 1.0 };
            let scaled = (value * multiplier).round();
            (scaled >= 0.0 && scaled <= u32::MAX as f64).then_some(scaled as u32)
        })
        .collect();

    match numbers.as_slice() {
        [] => SalaryRange::DEFAULT,
        [single] => SalaryRange::new(
            single.saturating_sub(SINGLE_FIGURE_WINDOW),
            single.saturating_add(SINGLE_FIGURE_WINDOW),
        ),
        [first, second, ..] => SalaryRange::new(*first, *second),
    }
}

pub fn normalize_salary(input: Option<&SalaryInput>) -> SalaryRange {
    match input {
        None => SalaryRange::FLEXIBLE,
        Some(SalaryInput::Range { min, max }) => SalaryRange::new(*min, *max),
        Some(SalaryInput::Text(text)) => parse_salary(text),
    }
}

/// Maps a free-text experience bucket to whole years.
pub fn bucket_experience(bucket: &str) -> u32 {
    let compact: String = bucket
        .to_lowercase()
        .replace("years", "")
        .replace("year", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    match compact.as_str() {
        "0-1" => 0,
        "1-2" => 2,
        "2-3" => 3,
        "3-5" => 4,
        "5-10" => 7,
        "10-20" => 15,
        "20+" => 22,
        other => other.parse::<u32>().unwrap_or(0),
    }
}

pub fn normalize_experience(input: Option<&ExperienceInput>) -> u32 {
    match input {
        None => 0,
        Some(ExperienceInput::Years(years)) => (*years).clamp(0, u32::MAX as i64) as u32,
        Some(ExperienceInput::Bucket(bucket)) => bucket_experience(bucket),
    }
}

/// Lower-cases and trims tokens into a set, dropping empties.
pub fn normalize_tokens(tokens: &[String]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn clamp_preference(value: Option<i64>) -> u8 {
    value.map(|v| v.clamp(1, 5) as u8).unwrap_or(3)
}

pub fn normalize_preferences(input: &PreferenceInput) -> PreferenceScores {
    PreferenceScores {
        working_with_data: clamp_preference(input.working_with_data),
        working_with_people: clamp_preference(input.working_with_people),
        creative_tasks: clamp_preference(input.creative_tasks),
        problem_solving: clamp_preference(input.problem_solving),
        leadership: clamp_preference(input.leadership),
        physical: clamp_preference(input.physical),
        outdoor: clamp_preference(input.outdoor),
        mechanical_aptitude: clamp_preference(input.mechanical_aptitude),
    }
}

/// Produces the canonical profile, including résumé insights.
pub fn normalize_profile(input: &ProfileInput, themes: &ThemeDictionary) -> UserProfile {
    let technical_skills = normalize_tokens(&input.technical_skills);
    let soft_skills = normalize_tokens(&input.soft_skills);
    let current_role = input.current_role.as_deref().unwrap_or("").trim().to_string();
    let resume_text = input.resume_text.as_deref().unwrap_or("").to_string();
    let experience_years = normalize_experience(input.experience_years.as_ref());

    let skills: Vec<String> = technical_skills
        .iter()
        .chain(soft_skills.iter())
        .cloned()
        .collect();
    let resume_insights = themes.analyze(&resume_text, &current_role, &skills);

    let seniority = extract_seniority(&current_role)
        .unwrap_or_else(|| ExperienceLevel::from_years(experience_years));

    UserProfile {
        technical_skills,
        soft_skills,
        interests: normalize_tokens(&input.interests),
        industries: normalize_tokens(&input.industries),
        certifications: normalize_tokens(&input.certifications),
        experience_years,
        current_role,
        resume_text,
        salary_expectation: normalize_salary(input.salary_expectation.as_ref()),
        preferences: normalize_preferences(&input.preferences),
        seniority,
        resume_insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::resume_insights::Theme;

    #[test]
    fn test_machine_form_round_trips() {
        for (a, b) in [(0, 0), (60_000, 90_000), (150_000, 250_000), (42, 42)] {
            assert_eq!(parse_salary(&format!("{a}-{b}")), SalaryRange { min: a, max: b });
        }
    }

    #[test]
    fn test_legacy_dollar_form() {
        assert_eq!(
            parse_salary("$80,000 - $120,000"),
            SalaryRange {
                min: 80_000,
                max: 120_000
            }
        );
    }

    #[test]
    fn test_legacy_k_form_case_insensitive() {
        assert_eq!(
            parse_salary("80k-120K"),
            SalaryRange {
                min: 80_000,
                max: 120_000
            }
        );
        assert_eq!(
            parse_salary("$95.5k - $110k"),
            SalaryRange {
                min: 95_500,
                max: 110_000
            }
        );
    }

    /// Regression: only the first two figures are used, never the whole list.
    #[test]
    fn test_first_two_numbers_are_min_and_max() {
        assert_eq!(
            parse_salary("$100,000 - $150,000 (target 125,000)"),
            SalaryRange {
                min: 100_000,
                max: 150_000
            }
        );
    }

    #[test]
    fn test_single_number_window() {
        assert_eq!(
            parse_salary("75000"),
            SalaryRange {
                min: 65_000,
                max: 85_000
            }
        );
        assert_eq!(parse_salary("$5k"), SalaryRange { min: 0, max: 15_000 });
    }

    #[test]
    fn test_flexible_and_open() {
        assert_eq!(parse_salary("Flexible"), SalaryRange::OPEN);
        assert_eq!(parse_salary("open to offers"), SalaryRange::OPEN);
    }

    #[test]
    fn test_unparseable_falls_back_to_default() {
        assert_eq!(parse_salary("competitive"), SalaryRange::DEFAULT);
    }

    #[test]
    fn test_missing_or_blank_salary_is_flexible() {
        assert!(normalize_salary(None).is_flexible());
        assert!(parse_salary("   ").is_flexible());
    }

    #[test]
    fn test_reversed_machine_form_is_ordered() {
        assert_eq!(
            parse_salary("90000-60000"),
            SalaryRange {
                min: 60_000,
                max: 90_000
            }
        );
    }

    #[test]
    fn test_experience_buckets() {
        let cases = [
            ("0-1", 0),
            ("1-2", 2),
            ("2-3", 3),
            ("3-5", 4),
            ("5-10", 7),
            ("10-20", 15),
            ("20+", 22),
            ("5-10 years", 7),
            ("unknown", 0),
            ("", 0),
        ];
        for (bucket, years) in cases {
            assert_eq!(bucket_experience(bucket), years, "bucket {bucket:?}");
        }
    }

    #[test]
    fn test_numeric_experience_clamped() {
        assert_eq!(normalize_experience(Some(&ExperienceInput::Years(-4))), 0);
        assert_eq!(normalize_experience(Some(&ExperienceInput::Years(12))), 12);
        assert_eq!(normalize_experience(None), 0);
    }

    #[test]
    fn test_tokens_lowercased_trimmed_deduplicated() {
        let tokens = normalize_tokens(&[
            " Python ".to_string(),
            "python".to_string(),
            "".to_string(),
            "SQL".to_string(),
        ]);
        assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["python", "sql"]);
    }

    #[test]
    fn test_preferences_clamped_with_neutral_default() {
        let prefs = normalize_preferences(&PreferenceInput {
            leadership: Some(9),
            outdoor: Some(0),
            ..Default::default()
        });
        assert_eq!(prefs.leadership, 5);
        assert_eq!(prefs.outdoor, 1);
        assert_eq!(prefs.working_with_data, 3);
    }

    #[test]
    fn test_normalize_profile_end_to_end() {
        let themes = ThemeDictionary::standard().unwrap();
        let input = ProfileInput {
            technical_skills: vec!["Product Management".to_string(), "Analytics".to_string()],
            current_role: Some("SVP Product".to_string()),
            experience_years: Some(ExperienceInput::Bucket("20+".to_string())),
            salary_expectation: Some(SalaryInput::Text("150000-250000".to_string())),
            ..Default::default()
        };
        let profile = normalize_profile(&input, &themes);

        assert_eq!(profile.experience_years, 22);
        assert_eq!(profile.seniority, ExperienceLevel::Executive);
        assert!(profile.technical_skills.contains("product management"));
        assert_eq!(
            profile.salary_expectation,
            SalaryRange {
                min: 150_000,
                max: 250_000
            }
        );
        assert_eq!(profile.resume_insights.dominant_theme, Some(Theme::Product));
    }

    #[test]
    fn test_seniority_falls_back_to_years() {
        let themes = ThemeDictionary::standard().unwrap();
        let input = ProfileInput {
            current_role: Some("Data Analyst".to_string()),
            experience_years: Some(ExperienceInput::Years(4)),
            ..Default::default()
        };
        assert_eq!(normalize_profile(&input, &themes).seniority, ExperienceLevel::Mid);
    }
}
