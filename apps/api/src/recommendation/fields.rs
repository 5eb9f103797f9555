//! Career field tags, their keyword tables and the field adjacency graph.
//!
//! The tables are data: `FieldTables::builder()` accepts any set of definitions and
//! edges, compiles the keyword matchers once, and the result is read-only afterwards.
//! Adjacency is always symmetric; adding `a - b` records both directions.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::recommendation::keyword_matcher::KeywordMatcher;

/// Closed set of career fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerField {
    Technology,
    ProductManagement,
    BusinessFinance,
    SalesMarketing,
    CommunicationsCreative,
    Healthcare,
    Education,
    SkilledTrades,
    GovernmentPublicService,
    ExecutiveLeadership,
    Operations,
    Legal,
    Other,
}

impl CareerField {
    /// All fields in canonical order. Ties in field scoring resolve to the earliest entry.
    pub const ALL: [CareerField; 13] = [
        CareerField::Technology,
        CareerField::ProductManagement,
        CareerField::BusinessFinance,
        CareerField::SalesMarketing,
        CareerField::CommunicationsCreative,
        CareerField::Healthcare,
        CareerField::Education,
        CareerField::SkilledTrades,
        CareerField::GovernmentPublicService,
        CareerField::ExecutiveLeadership,
        CareerField::Operations,
        CareerField::Legal,
        CareerField::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerField::Technology => "technology",
            CareerField::ProductManagement => "product_management",
            CareerField::BusinessFinance => "business_finance",
            CareerField::SalesMarketing => "sales_marketing",
            CareerField::CommunicationsCreative => "communications_creative",
            CareerField::Healthcare => "healthcare",
            CareerField::Education => "education",
            CareerField::SkilledTrades => "skilled_trades",
            CareerField::GovernmentPublicService => "government_public_service",
            CareerField::ExecutiveLeadership => "executive_leadership",
            CareerField::Operations => "operations",
            CareerField::Legal => "legal",
            CareerField::Other => "other",
        }
    }
}

impl fmt::Display for CareerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw keyword data for one field, before compilation.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub field: CareerField,
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
}

impl FieldDefinition {
    pub fn new(field: CareerField, primary: &[&str], secondary: &[&str]) -> Self {
        Self {
            field,
            primary: primary.iter().map(|s| s.to_string()).collect(),
            secondary: secondary.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Compiled keyword matchers for one field.
#[derive(Debug, Clone)]
pub struct FieldKeywords {
    pub primary: KeywordMatcher,
    pub secondary: KeywordMatcher,
}

/// Read-only field tables shared by every request.
#[derive(Debug, Clone)]
pub struct FieldTables {
    keywords: HashMap<CareerField, FieldKeywords>,
    adjacency: HashMap<CareerField, BTreeSet<CareerField>>,
}

/// Relationship between two fields on the adjacency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDistance {
    Same,
    Related,
    TwoHops,
    Distant,
}

#[derive(Debug, Default)]
pub struct FieldTablesBuilder {
    definitions: Vec<FieldDefinition>,
    edges: Vec<(CareerField, CareerField)>,
}

impl FieldTablesBuilder {
    pub fn definition(mut self, definition: FieldDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn related(mut self, a: CareerField, b: CareerField) -> Self {
        self.edges.push((a, b));
        self
    }

    pub fn build(self) -> Result<FieldTables, regex::Error> {
        let mut keywords = HashMap::new();
        for def in self.definitions {
            keywords.insert(
                def.field,
                FieldKeywords {
                    primary: KeywordMatcher::new(&def.primary)?,
                    secondary: KeywordMatcher::new(&def.secondary)?,
                },
            );
        }

        let mut adjacency: HashMap<CareerField, BTreeSet<CareerField>> = HashMap::new();
        for (a, b) in self.edges {
            if a == b {
                continue;
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }

        Ok(FieldTables {
            keywords,
            adjacency,
        })
    }
}

impl FieldTables {
    pub fn builder() -> FieldTablesBuilder {
        FieldTablesBuilder::default()
    }

    /// The built-in tables.
    pub fn standard() -> Result<Self, regex::Error> {
        let mut builder = Self::builder();
        for def in standard_definitions() {
            builder = builder.definition(def);
        }
        for (a, b) in STANDARD_EDGES {
            builder = builder.related(*a, *b);
        }
        builder.build()
    }

    pub fn keywords(&self, field: CareerField) -> Option<&FieldKeywords> {
        self.keywords.get(&field)
    }

    /// Fields directly adjacent to `field`, in canonical order.
    pub fn related_fields(&self, field: CareerField) -> Vec<CareerField> {
        self.adjacency
            .get(&field)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Shortest-path hop count between two fields, `None` when disconnected.
    pub fn hops(&self, from: CareerField, to: CareerField) -> Option<usize> {
        if from == to {
            return Some(0);
        }
        let mut seen = BTreeSet::from([from]);
        let mut queue = VecDeque::from([(from, 0usize)]);
        while let Some((field, depth)) = queue.pop_front() {
            for next in self.related_fields(field) {
                if next == to {
                    return Some(depth + 1);
                }
                if seen.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        None
    }

    pub fn distance(&self, from: CareerField, to: CareerField) -> FieldDistance {
        match self.hops(from, to) {
            Some(0) => FieldDistance::Same,
            Some(1) => FieldDistance::Related,
            Some(2) => FieldDistance::TwoHops,
            _ => FieldDistance::Distant,
        }
    }
}

const STANDARD_EDGES: &[(CareerField, CareerField)] = &[
    (CareerField::Technology, CareerField::ProductManagement),
    (CareerField::Technology, CareerField::BusinessFinance),
    (CareerField::Technology, CareerField::CommunicationsCreative),
    (CareerField::Technology, CareerField::Operations),
    (CareerField::ProductManagement, CareerField::ExecutiveLeadership),
    (CareerField::ProductManagement, CareerField::SalesMarketing),
    (CareerField::ProductManagement, CareerField::BusinessFinance),
    (CareerField::BusinessFinance, CareerField::ExecutiveLeadership),
    (CareerField::BusinessFinance, CareerField::Operations),
    (CareerField::BusinessFinance, CareerField::Legal),
    (CareerField::BusinessFinance, CareerField::SalesMarketing),
    (CareerField::SalesMarketing, CareerField::CommunicationsCreative),
    (CareerField::CommunicationsCreative, CareerField::Education),
    (CareerField::Healthcare, CareerField::GovernmentPublicService),
    (CareerField::Healthcare, CareerField::Education),
    (CareerField::Education, CareerField::GovernmentPublicService),
    (CareerField::GovernmentPublicService, CareerField::Legal),
    (CareerField::GovernmentPublicService, CareerField::Operations),
    (CareerField::ExecutiveLeadership, CareerField::Operations),
    (CareerField::SkilledTrades, CareerField::Operations),
];

fn standard_definitions() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new(
            CareerField::Technology,
            &[
                "software", "engineer", "engineering", "developer", "programming", "devops",
                "cybersecurity", "data scientist", "machine learning", "cloud", "kubernetes",
                "python", "sql", "javascript", "rust", "java", "database",
            ],
            &[
                "data", "analytics", "technical", "systems", "api", "apis", "code",
                "automation", "tableau", "analyst", "infrastructure", "dashboards",
            ],
        ),
        FieldDefinition::new(
            CareerField::ProductManagement,
            &[
                "product manager", "product management", "product owner", "roadmap",
                "product strategy", "product",
            ],
            &[
                "user research", "backlog", "stakeholders", "launch", "launches",
                "go-to-market", "features", "prioritization",
            ],
        ),
        FieldDefinition::new(
            CareerField::BusinessFinance,
            &[
                "finance", "financial", "accounting", "accountant", "cpa", "investment",
                "banking", "audit", "fp&a", "actuary",
            ],
            &[
                "budget", "budgets", "budgeting", "forecasting", "excel", "business",
                "analyst", "consulting", "revenue",
            ],
        ),
        FieldDefinition::new(
            CareerField::SalesMarketing,
            &[
                "sales", "marketing", "account executive", "brand", "seo", "advertising",
                "business development", "campaign", "campaigns",
            ],
            &[
                "crm", "customers", "growth", "social media", "pipeline", "negotiation",
                "promotion", "quota",
            ],
        ),
        FieldDefinition::new(
            CareerField::CommunicationsCreative,
            &[
                "ux", "designer", "design", "writer", "editor", "journalist",
                "communications", "public relations", "copywriter", "illustrator",
                "photographer", "content",
            ],
            &[
                "creative", "figma", "storytelling", "media", "visual", "writing", "video",
                "documentation",
            ],
        ),
        FieldDefinition::new(
            CareerField::Healthcare,
            &[
                "nurse", "nursing", "physician", "surgeon", "anesthesia", "anesthetist",
                "anesthesiologist", "crna", "medical", "clinical", "patient", "patients",
                "hospital", "pharmacist", "pharmacy", "paramedic", "healthcare", "therapist",
                "dental",
            ],
            &[
                "health", "wellness", "diagnosis", "treatment", "clinic", "emt",
                "vital signs",
            ],
        ),
        FieldDefinition::new(
            CareerField::Education,
            &[
                "teacher", "teaching", "curriculum", "classroom", "professor", "tutor",
                "instructional", "education", "school",
            ],
            &["students", "student", "learning", "training", "lessons", "academic"],
        ),
        FieldDefinition::new(
            CareerField::SkilledTrades,
            &[
                "electrician", "plumber", "hvac", "welder", "welding", "carpenter",
                "carpentry", "mechanic", "construction", "lineman", "machinist",
            ],
            &[
                "tools", "wiring", "repair", "repairs", "maintenance", "installation",
                "apprentice", "equipment", "blueprints",
            ],
        ),
        FieldDefinition::new(
            CareerField::GovernmentPublicService,
            &[
                "government", "public service", "policy", "federal", "municipal",
                "civil service", "public sector", "police", "firefighter", "social worker",
                "nonprofit",
            ],
            &["community", "public", "regulations", "agency", "citizens"],
        ),
        FieldDefinition::new(
            CareerField::ExecutiveLeadership,
            &[
                "ceo", "cto", "cfo", "coo", "cmo", "chief", "vice president", "vp", "svp",
                "president", "executive",
            ],
            &["leadership", "strategy", "board", "vision", "organisation", "organization"],
        ),
        FieldDefinition::new(
            CareerField::Operations,
            &[
                "operations", "logistics", "supply chain", "procurement", "project manager",
                "program manager", "inventory", "warehouse",
            ],
            &[
                "process", "processes", "scheduling", "vendor", "efficiency", "coordination",
                "lean", "six sigma",
            ],
        ),
        FieldDefinition::new(
            CareerField::Legal,
            &[
                "attorney", "attorneys", "lawyer", "legal", "paralegal", "counsel",
                "litigation", "law",
            ],
            &["compliance", "contracts", "regulatory", "court"],
        ),
        FieldDefinition::new(CareerField::Other, &[], &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> FieldTables {
        FieldTables::standard().unwrap()
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let t = tables();
        for a in CareerField::ALL {
            for b in t.related_fields(a) {
                assert_eq!(t.hops(b, a), Some(1), "{a} -> {b} has no reverse edge");
            }
        }
    }

    #[test]
    fn test_every_field_has_keywords() {
        let t = tables();
        for field in CareerField::ALL {
            assert!(t.keywords(field).is_some(), "no keyword table for {field}");
        }
    }

    #[test]
    fn test_product_to_healthcare_is_distant() {
        let t = tables();
        assert_eq!(
            t.distance(CareerField::ProductManagement, CareerField::Healthcare),
            FieldDistance::Distant
        );
        assert_eq!(t.hops(CareerField::ProductManagement, CareerField::Healthcare), Some(4));
    }

    #[test]
    fn test_distance_bands() {
        let t = tables();
        assert_eq!(
            t.distance(CareerField::Technology, CareerField::Technology),
            FieldDistance::Same
        );
        assert_eq!(
            t.distance(CareerField::Technology, CareerField::ProductManagement),
            FieldDistance::Related
        );
        assert_eq!(
            t.distance(CareerField::Technology, CareerField::SalesMarketing),
            FieldDistance::TwoHops
        );
    }

    #[test]
    fn test_other_is_disconnected() {
        let t = tables();
        assert!(t.related_fields(CareerField::Other).is_empty());
        assert_eq!(t.hops(CareerField::Other, CareerField::Technology), None);
        assert_eq!(
            t.distance(CareerField::Other, CareerField::Technology),
            FieldDistance::Distant
        );
    }

    #[test]
    fn test_custom_tables_via_builder() {
        let t = FieldTables::builder()
            .definition(FieldDefinition::new(CareerField::Legal, &["barrister"], &[]))
            .related(CareerField::Legal, CareerField::Education)
            .build()
            .unwrap();
        assert_eq!(t.hops(CareerField::Education, CareerField::Legal), Some(1));
        assert!(t.keywords(CareerField::Legal).unwrap().primary.contains_any("Barrister"));
        assert!(t.keywords(CareerField::Technology).is_none());
    }

    #[test]
    fn test_field_serde_is_snake_case() {
        let json = serde_json::to_string(&CareerField::ProductManagement).unwrap();
        assert_eq!(json, "\"product_management\"");
        let parsed: CareerField = serde_json::from_str("\"skilled_trades\"").unwrap();
        assert_eq!(parsed, CareerField::SkilledTrades);
    }
}
