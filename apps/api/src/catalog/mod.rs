//! Career catalog: read-only, in-memory list of career records.
//!
//! Loaded once at startup (built-in JSON or `CATALOG_PATH`) and shared behind an `Arc`.
//! Record order is preserved; the engine processes candidates in catalog order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::recommendation::fields::CareerField;

/// Built-in catalog used when no `CATALOG_PATH` is configured.
const BUILTIN_CATALOG: &str = include_str!("../../data/careers.json");

/// Seniority band of a career, ordered `junior < mid < senior < executive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    /// Position on the `junior < mid < senior < executive` chain.
    pub fn rank(&self) -> u8 {
        match self {
            ExperienceLevel::Junior => 0,
            ExperienceLevel::Mid => 1,
            ExperienceLevel::Senior => 2,
            ExperienceLevel::Executive => 3,
        }
    }

    /// Buckets raw years of experience into a level.
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=2 => ExperienceLevel::Junior,
            3..=6 => ExperienceLevel::Mid,
            7..=14 => ExperienceLevel::Senior,
            _ => ExperienceLevel::Executive,
        }
    }
}

/// A single career in the catalog. Immutable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub career_id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub required_technical_skills: Vec<String>,
    #[serde(default)]
    pub required_soft_skills: Vec<String>,
    pub min_salary: u32,
    pub max_salary: u32,
    pub experience_level: ExperienceLevel,
    pub min_years_experience: u32,
    pub max_years_experience: u32,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub work_environments: Vec<String>,
    #[serde(default)]
    pub learning_path: String,
    /// Explicit field tag. When absent the classifier infers one from title + description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_field: Option<CareerField>,
}

impl CareerRecord {
    /// Lower-cased union of required technical and soft skills.
    pub fn required_skills(&self) -> HashSet<String> {
        self.required_technical_skills
            .iter()
            .chain(self.required_soft_skills.iter())
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Title and description joined for keyword scans.
    pub fn searchable_text(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Career record at position {0} has an empty career_id")]
    EmptyId(usize),

    #[error("Duplicate career_id '{0}'")]
    DuplicateId(String),

    #[error("Career '{0}' has min_salary greater than max_salary")]
    SalaryRange(String),

    #[error("Career '{0}' has min_years_experience greater than max_years_experience")]
    ExperienceRange(String),
}

/// The loaded, validated career catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CareerRecord>,
}

impl Catalog {
    /// Validates record invariants and id uniqueness, preserving input order.
    pub fn from_records(records: Vec<CareerRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (position, record) in records.iter().enumerate() {
            if record.career_id.trim().is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(record.career_id.clone()) {
                return Err(CatalogError::DuplicateId(record.career_id.clone()));
            }
            if record.min_salary > record.max_salary {
                return Err(CatalogError::SalaryRange(record.career_id.clone()));
            }
            if record.min_years_experience > record.max_years_experience {
                return Err(CatalogError::ExperienceRange(record.career_id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CareerRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads from `path` when given, otherwise the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::builtin()?,
        };
        info!(
            "Career catalog loaded: {} records ({})",
            catalog.len(),
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[CareerRecord] {
        &self.records
    }

    pub fn get(&self, career_id: &str) -> Option<&CareerRecord> {
        self.records.iter().find(|r| r.career_id == career_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn make_career(id: &str, title: &str, level: ExperienceLevel) -> CareerRecord {
        CareerRecord {
            career_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            required_technical_skills: vec![],
            required_soft_skills: vec![],
            min_salary: 60_000,
            max_salary: 90_000,
            experience_level: level,
            min_years_experience: 0,
            max_years_experience: 5,
            companies: vec![],
            work_environments: vec![],
            learning_path: String::new(),
            career_field: None,
        }
    }

    #[test]
    fn test_builtin_catalog_loads_and_validates() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 50, "built-in catalog has {}", catalog.len());
        for record in catalog.records() {
            assert!(record.min_salary <= record.max_salary, "{}", record.career_id);
            assert!(
                record.min_years_experience <= record.max_years_experience,
                "{}",
                record.career_id
            );
        }
    }

    #[test]
    fn test_builtin_catalog_contains_scenario_fixtures() {
        let catalog = Catalog::builtin().unwrap();
        for id in [
            "family-medicine-physician",
            "medical-assistant",
            "delivery-driver",
            "nurse-anesthetist",
            "airline-pilot",
        ] {
            assert!(catalog.get(id).is_some(), "missing fixture {id}");
        }
        let assistant = catalog.get("medical-assistant").unwrap();
        assert_eq!((assistant.min_salary, assistant.max_salary), (35_000, 45_000));
        let driver = catalog.get("delivery-driver").unwrap();
        assert_eq!((driver.min_salary, driver.max_salary), (30_000, 50_000));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let records = vec![
            make_career("a", "Analyst", ExperienceLevel::Junior),
            make_career("a", "Analyst II", ExperienceLevel::Mid),
        ];
        let err = Catalog::from_records(records).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_inverted_salary_rejected() {
        let mut record = make_career("x", "Analyst", ExperienceLevel::Junior);
        record.min_salary = 100_000;
        record.max_salary = 50_000;
        let err = Catalog::from_records(vec![record]).unwrap_err();
        assert!(matches!(err, CatalogError::SalaryRange(_)));
    }

    #[test]
    fn test_inverted_experience_rejected() {
        let mut record = make_career("x", "Analyst", ExperienceLevel::Junior);
        record.min_years_experience = 8;
        record.max_years_experience = 2;
        let err = Catalog::from_records(vec![record]).unwrap_err();
        assert!(matches!(err, CatalogError::ExperienceRange(_)));
    }

    #[test]
    fn test_empty_id_rejected() {
        let record = make_career("  ", "Analyst", ExperienceLevel::Junior);
        assert!(matches!(
            Catalog::from_records(vec![record]).unwrap_err(),
            CatalogError::EmptyId(0)
        ));
    }

    #[test]
    fn test_load_from_file_preserves_order() {
        let json = r#"[
            {"career_id": "b", "title": "Second", "description": "", "min_salary": 1,
             "max_salary": 2, "experience_level": "mid", "min_years_experience": 0,
             "max_years_experience": 1},
            {"career_id": "a", "title": "First", "description": "", "min_salary": 1,
             "max_salary": 2, "experience_level": "junior", "min_years_experience": 0,
             "max_years_experience": 1, "career_field": "technology"}
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        let ids: Vec<_> = catalog.records().iter().map(|r| r.career_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(catalog.get("a").unwrap().career_field, Some(CareerField::Technology));
        assert_eq!(catalog.get("b").unwrap().career_field, None);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::from_path(Path::new("/nonexistent/careers.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_experience_level_ordering_and_buckets() {
        assert!(ExperienceLevel::Junior < ExperienceLevel::Mid);
        assert!(ExperienceLevel::Senior < ExperienceLevel::Executive);
        assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_years(3), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(10), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::from_years(22), ExperienceLevel::Executive);
    }
}
