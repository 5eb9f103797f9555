//! Résumé insights: keyword-frequency scan over résumé text, current role and skills.
//!
//! Themes form a closed set. Each theme owns a keyword list; counts are total whole-word
//! occurrences. The dominant theme is the highest count, ties resolved by `Theme::ALL` order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::recommendation::fields::CareerField;
use crate::recommendation::keyword_matcher::KeywordMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Product,
    Engineering,
    DataScience,
    Management,
    Sales,
    Marketing,
    Communications,
    Creative,
    Healthcare,
    Trades,
    Education,
    Finance,
    Operations,
    Legal,
}

impl Theme {
    pub const ALL: [Theme; 14] = [
        Theme::Product,
        Theme::Engineering,
        Theme::DataScience,
        Theme::Management,
        Theme::Sales,
        Theme::Marketing,
        Theme::Communications,
        Theme::Creative,
        Theme::Healthcare,
        Theme::Trades,
        Theme::Education,
        Theme::Finance,
        Theme::Operations,
        Theme::Legal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Product => "product",
            Theme::Engineering => "engineering",
            Theme::DataScience => "data_science",
            Theme::Management => "management",
            Theme::Sales => "sales",
            Theme::Marketing => "marketing",
            Theme::Communications => "communications",
            Theme::Creative => "creative",
            Theme::Healthcare => "healthcare",
            Theme::Trades => "trades",
            Theme::Education => "education",
            Theme::Finance => "finance",
            Theme::Operations => "operations",
            Theme::Legal => "legal",
        }
    }

    /// The career field a theme belongs to.
    pub fn owning_field(&self) -> CareerField {
        match self {
            Theme::Product => CareerField::ProductManagement,
            Theme::Engineering | Theme::DataScience => CareerField::Technology,
            Theme::Management => CareerField::ExecutiveLeadership,
            Theme::Sales | Theme::Marketing => CareerField::SalesMarketing,
            Theme::Communications | Theme::Creative => CareerField::CommunicationsCreative,
            Theme::Healthcare => CareerField::Healthcare,
            Theme::Trades => CareerField::SkilledTrades,
            Theme::Education => CareerField::Education,
            Theme::Finance => CareerField::BusinessFinance,
            Theme::Operations => CareerField::Operations,
            Theme::Legal => CareerField::Legal,
        }
    }

    fn default_keywords(&self) -> &'static [&'static str] {
        match self {
            Theme::Product => &[
                "product", "products", "product management", "product manager",
                "product owner", "roadmap", "roadmaps", "product strategy", "backlog",
                "mvp", "go-to-market",
            ],
            Theme::Engineering => &[
                "engineer", "engineering", "software", "developer", "backend", "frontend",
                "devops", "rust", "java", "javascript", "kubernetes", "microservices", "api",
                "cloud",
            ],
            Theme::DataScience => &[
                "data", "analytics", "python", "sql", "tableau", "machine learning",
                "statistics", "data science", "modeling", "dashboards",
            ],
            Theme::Management => &[
                "manager", "management", "strategy", "leadership", "director", "executive",
                "svp", "vp", "stakeholder", "stakeholders", "team lead",
            ],
            Theme::Sales => &[
                "sales", "quota", "account executive", "business development", "crm",
                "salesforce", "pipeline", "negotiation", "revenue",
            ],
            Theme::Marketing => &[
                "marketing", "brand", "seo", "campaign", "campaigns", "content marketing",
                "social media", "digital marketing",
            ],
            Theme::Communications => &[
                "communications", "public relations", "writing", "writer", "editor",
                "journalism", "copywriting", "media relations", "storytelling",
            ],
            Theme::Creative => &[
                "design", "designer", "ux", "ui", "figma", "creative", "illustration",
                "photography", "video", "visual",
            ],
            Theme::Healthcare => &[
                "patient", "patients", "clinical", "nurse", "nursing", "hospital", "medical",
                "healthcare", "physician", "rn", "bsn", "anesthesia", "pharmacy", "emt",
                "icu", "surgery", "diagnosis",
            ],
            Theme::Trades => &[
                "electrician", "plumbing", "plumber", "hvac", "welding", "welder",
                "carpentry", "carpenter", "construction", "mechanic", "wiring",
                "apprentice", "maintenance",
            ],
            Theme::Education => &[
                "teacher", "teaching", "curriculum", "classroom", "students", "education",
                "tutoring", "instructional design", "lesson", "lessons", "school",
            ],
            Theme::Finance => &[
                "finance", "financial", "accounting", "budget", "budgeting", "forecasting",
                "audit", "cpa", "investment", "fp&a", "valuation", "excel",
            ],
            Theme::Operations => &[
                "operations", "logistics", "supply chain", "process improvement", "lean",
                "six sigma", "procurement", "inventory", "scheduling", "vendor",
            ],
            Theme::Legal => &[
                "legal", "law", "attorney", "lawyer", "compliance", "contracts",
                "litigation", "paralegal", "regulatory", "counsel",
            ],
        }
    }
}

/// Keyword → theme dictionary, compiled once.
#[derive(Debug, Clone)]
pub struct ThemeDictionary {
    matchers: Vec<(Theme, KeywordMatcher)>,
}

impl ThemeDictionary {
    pub fn standard() -> Result<Self, regex::Error> {
        let matchers = Theme::ALL
            .iter()
            .map(|theme| Ok((*theme, KeywordMatcher::new(theme.default_keywords())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { matchers })
    }

    /// Occurrence count per theme; themes with zero hits are omitted.
    pub fn theme_counts(&self, text: &str) -> BTreeMap<Theme, u32> {
        self.matchers
            .iter()
            .filter_map(|(theme, matcher)| {
                let count = matcher.occurrences(text) as u32;
                (count > 0).then_some((*theme, count))
            })
            .collect()
    }

    /// Whether any keyword of `theme` appears in `text`.
    pub fn mentions(&self, theme: Theme, text: &str) -> bool {
        self.matchers
            .iter()
            .any(|(t, matcher)| *t == theme && matcher.contains_any(text))
    }

    pub fn analyze(
        &self,
        resume_text: &str,
        current_role: &str,
        skills: &[String],
    ) -> ResumeInsights {
        let skills_text = skills.join(". ");
        let corpus = [resume_text, current_role, skills_text.as_str()].join(". ");
        let theme_counts = self.theme_counts(&corpus);
        let dominant_theme = dominant(&theme_counts);
        let current_role_theme = dominant(&self.theme_counts(current_role));

        ResumeInsights {
            theme_counts,
            dominant_theme,
            current_role_theme,
        }
    }
}

/// Highest-count theme; ties go to the earliest theme in `Theme::ALL`.
fn dominant(counts: &BTreeMap<Theme, u32>) -> Option<Theme> {
    let mut best: Option<(Theme, u32)> = None;
    for theme in Theme::ALL {
        let count = counts.get(&theme).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((theme, count)),
        }
    }
    best.map(|(theme, _)| theme)
}

/// Per-request résumé analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeInsights {
    pub theme_counts: BTreeMap<Theme, u32>,
    pub dominant_theme: Option<Theme>,
    pub current_role_theme: Option<Theme>,
}

impl ResumeInsights {
    pub fn count(&self, theme: Theme) -> u32 {
        self.theme_counts.get(&theme).copied().unwrap_or(0)
    }

    /// Count of the dominant theme, 0 when there is none.
    pub fn dominant_strength(&self) -> u32 {
        self.dominant_theme.map(|t| self.count(t)).unwrap_or(0)
    }
}
