//! Match reasons: up to four short human-readable strings per recommendation.

use crate::recommendation::classifier::FieldAssignment;
use crate::recommendation::fields::{FieldDistance, FieldTables};
use crate::recommendation::scoring::ScoredCandidate;

pub const MAX_REASONS: usize = 4;

/// Reasons in fixed priority order: skills, experience, salary, field, theme.
pub fn match_reasons(
    candidate: &ScoredCandidate<'_>,
    user_field: &FieldAssignment,
    tables: &FieldTables,
) -> Vec<String> {
    let career = candidate.career;
    let mut reasons = Vec::with_capacity(MAX_REASONS + 1);

    let skill_pct = (candidate.components.skill_overlap * 100.0).round() as u32;
    if skill_pct > 0 {
        reasons.push(format!("Skill match: {skill_pct}%"));
    }

    reasons.push(format!(
        "Experience level: {}",
        career.experience_level.as_str()
    ));

    reasons.push(format!(
        "Salary range: ${} - ${}",
        thousands(career.min_salary),
        thousands(career.max_salary)
    ));

    if matches!(
        tables.distance(user_field.field, candidate.career_field.field),
        FieldDistance::Same | FieldDistance::Related
    ) {
        reasons.push(format!("Field alignment with {}", user_field.field));
    }

    if let Some(theme) = candidate.boost.theme {
        reasons.push(format!(
            "Builds on your {} background",
            theme.as_str().replace('_', " ")
        ));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// `1234567` → `"1,234,567"`.
pub fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
