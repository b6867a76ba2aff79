use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, HiveSnapshot, Severity};
use chrono::NaiveDate;

pub const URBAN_SITE: &str = "🏙️ Urban location: Ensure compliance with local regulations and maintain good neighbor relations.";
pub const EXPOSED_SITE: &str =
    "💨 Exposed location: Provide windbreak and secure hive components properly.";

const URBAN_KEYWORDS: &[&str] = &["urban", "city"];
const EXPOSED_KEYWORDS: &[&str] = &["windy", "exposed"];

fn mentions(location: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| location.contains(k))
}

/// Apiary location rule
///
/// Scans the free-text location for keywords (case-insensitive substring).
/// The urban and exposed checks are independent and may both fire.
pub struct LocationRule;

impl Rule<HiveSnapshot> for LocationRule {
    fn id(&self) -> &'static str {
        "location"
    }

    fn name(&self) -> &'static str {
        "Apiary Location"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let location = hive.location.to_lowercase();
        let mut lines = Vec::new();

        if mentions(&location, URBAN_KEYWORDS) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Location,
                Severity::Info,
                URBAN_SITE,
            ));
        }

        if mentions(&location, EXPOSED_KEYWORDS) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Location,
                Severity::Advisory,
                EXPOSED_SITE,
            ));
        }

        lines
    }
}
