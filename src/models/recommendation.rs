use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between advisory lines in rendered text.
pub const LINE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceCategory {
    Strength,
    Queen,
    Brood,
    Population,
    HoneyStores,
    Pests,
    Disease,
    Location,
    Treatment,
    Season,
    Production,
    Market,
    ProductType,
    Quality,
    Origin,
    General,
}

impl AdviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceCategory::Strength => "Colony Strength",
            AdviceCategory::Queen => "Queen Status",
            AdviceCategory::Brood => "Brood Pattern",
            AdviceCategory::Population => "Population",
            AdviceCategory::HoneyStores => "Honey Stores",
            AdviceCategory::Pests => "Pest Level",
            AdviceCategory::Disease => "Disease Signs",
            AdviceCategory::Location => "Location",
            AdviceCategory::Treatment => "Treatments",
            AdviceCategory::Season => "Season",
            AdviceCategory::Production => "Production",
            AdviceCategory::Market => "Market Timing",
            AdviceCategory::ProductType => "Product Type",
            AdviceCategory::Quality => "Quality Grade",
            AdviceCategory::Origin => "Origin",
            AdviceCategory::General => "General",
        }
    }
}

impl std::fmt::Display for AdviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Advisory,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Advisory => "Advisory",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One self-contained recommendation produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryLine {
    pub category: AdviceCategory,
    pub severity: Severity,
    pub text: String,
}

impl AdvisoryLine {
    pub fn new(category: AdviceCategory, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            text: text.into(),
        }
    }
}

/// Ordered output of one engine evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub lines: Vec<AdvisoryLine>,
}

impl Advisory {
    pub fn new(lines: Vec<AdvisoryLine>) -> Self {
        Self { lines }
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.lines.iter().map(|l| l.severity).max()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    pub fn render(&self) -> String {
        self.texts().collect::<Vec<_>>().join(LINE_SEPARATOR)
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    Hive,
    Product,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Hive => "Hive",
            SubjectKind::Product => "Product",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hive" => Some(SubjectKind::Hive),
            "product" => Some(SubjectKind::Product),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory text persisted alongside the record that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Option<i64>,
    pub subject_kind: SubjectKind,
    pub subject_id: String,
    pub beekeeper: String,
    pub recommendations: String,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn new(
        subject_kind: SubjectKind,
        subject_id: impl Into<String>,
        beekeeper: impl Into<String>,
        recommendations: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            subject_kind,
            subject_id: subject_id.into(),
            beekeeper: beekeeper.into(),
            recommendations: recommendations.into(),
            created_at: Utc::now(),
        }
    }
}
