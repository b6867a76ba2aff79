use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, DiseaseSign, HiveSnapshot, Severity};
use chrono::NaiveDate;

pub const HIGH_PESTS: &str =
    "🐛 High pest levels detected! Immediate treatment required to prevent colony collapse.";
pub const MODERATE_PESTS: &str =
    "🐛 Moderate pest levels. Monitor closely and consider preventive treatments.";
pub const VARROA: &str =
    "🦟 Varroa mites detected. Apply appropriate mite treatment and monitor mite levels regularly.";
pub const FOULBROOD: &str = "🚨 CRITICAL: Foulbrood detected. Contact local bee inspector immediately - quarantine may be required.";
pub const NOSEMA: &str =
    "🤢 Nosema detected. Improve ventilation, reduce moisture, and consider fumagillin treatment.";
pub const HIVE_PESTS: &str =
    "🪲 Hive pests detected. Strengthen colony, reduce hive space, and use appropriate traps.";

const HIGH_PEST_MIN: i64 = 7;
const MODERATE_PEST_MIN: i64 = 4;

/// Pest level rule
///
/// Pest level is a 0-10 inspection score. 7 and above calls for immediate
/// treatment, 4-6 for closer monitoring.
pub struct PestLevelRule;

impl Rule<HiveSnapshot> for PestLevelRule {
    fn id(&self) -> &'static str {
        "pest_level"
    }

    fn name(&self) -> &'static str {
        "Pest Level"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let level = hive.pest_level();

        if level >= HIGH_PEST_MIN {
            vec![AdvisoryLine::new(
                AdviceCategory::Pests,
                Severity::Critical,
                HIGH_PESTS,
            )]
        } else if level >= MODERATE_PEST_MIN {
            vec![AdvisoryLine::new(
                AdviceCategory::Pests,
                Severity::Advisory,
                MODERATE_PESTS,
            )]
        } else {
            Vec::new()
        }
    }
}

/// Disease signs rule
///
/// Every recognized sign is checked independently and several lines may
/// fire. The two foulbroods share one notifiable-disease line, as do the
/// two opportunistic hive pests. Output order is fixed: varroa, foulbrood,
/// nosema, hive pests.
pub struct DiseaseSignsRule;

impl Rule<HiveSnapshot> for DiseaseSignsRule {
    fn id(&self) -> &'static str {
        "disease_signs"
    }

    fn name(&self) -> &'static str {
        "Disease Signs"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let diseases = hive.diseases();
        let mut lines = Vec::new();

        if diseases.is_empty() {
            return lines;
        }

        if diseases.contains(&DiseaseSign::VarroaMites) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Disease,
                Severity::Warning,
                VARROA,
            ));
        }

        if diseases.iter().any(DiseaseSign::is_foulbrood) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Disease,
                Severity::Critical,
                FOULBROOD,
            ));
        }

        if diseases.contains(&DiseaseSign::Nosema) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Disease,
                Severity::Warning,
                NOSEMA,
            ));
        }

        if diseases.iter().any(DiseaseSign::is_hive_pest) {
            lines.push(AdvisoryLine::new(
                AdviceCategory::Disease,
                Severity::Advisory,
                HIVE_PESTS,
            ));
        }

        lines
    }
}
