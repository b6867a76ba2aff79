use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, BroodPattern, HiveSnapshot, QueenStatus, Severity};
use chrono::NaiveDate;

pub const QUEENLESS: &str = "🚨 URGENT: No queen detected. Immediate action required - introduce new queen or allow colony to requeen.";
pub const QUEEN_UNCERTAIN: &str = "🔍 Queen status uncertain. Conduct thorough inspection to locate queen or signs of queen activity.";
pub const SPOTTY_BROOD: &str = "⚠️ Spotty brood pattern may indicate queen issues, disease, or poor nutrition. Monitor closely.";
pub const NO_BROOD: &str =
    "🚨 No brood pattern - check for queen presence and laying activity immediately.";

/// Queen status rule
///
/// A queenless colony dies out within weeks unless it is requeened. An
/// unknown status means the last inspection could not confirm her.
pub struct QueenStatusRule;

impl Rule<HiveSnapshot> for QueenStatusRule {
    fn id(&self) -> &'static str {
        "queen_status"
    }

    fn name(&self) -> &'static str {
        "Queen Status"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let line = match hive.queen_status {
            Some(QueenStatus::NotPresent) => Some(AdvisoryLine::new(
                AdviceCategory::Queen,
                Severity::Critical,
                QUEENLESS,
            )),
            Some(QueenStatus::Unknown) => Some(AdvisoryLine::new(
                AdviceCategory::Queen,
                Severity::Advisory,
                QUEEN_UNCERTAIN,
            )),
            Some(QueenStatus::Present) | None => None,
        };

        line.into_iter().collect()
    }
}

/// Brood pattern rule
///
/// Brood is the best indirect evidence of a laying queen. Spotty brood
/// points to a failing queen, disease or poor nutrition; no brood at all
/// needs an immediate queen check.
pub struct BroodPatternRule;

impl Rule<HiveSnapshot> for BroodPatternRule {
    fn id(&self) -> &'static str {
        "brood_pattern"
    }

    fn name(&self) -> &'static str {
        "Brood Pattern"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let line = match hive.brood_pattern {
            Some(BroodPattern::Spotty) => Some(AdvisoryLine::new(
                AdviceCategory::Brood,
                Severity::Warning,
                SPOTTY_BROOD,
            )),
            Some(BroodPattern::None) => Some(AdvisoryLine::new(
                AdviceCategory::Brood,
                Severity::Critical,
                NO_BROOD,
            )),
            Some(BroodPattern::Solid) | Some(BroodPattern::Other) | None => None,
        };

        line.into_iter().collect()
    }
}
