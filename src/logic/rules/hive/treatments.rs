use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, HiveSnapshot, Severity, Treatment};
use chrono::NaiveDate;

pub const RECENT_TREATMENT: &str = "💊 Recent treatments applied. Monitor colony response and avoid honey harvest during withdrawal periods.";

/// Treatments count as recent within this many 30-day months.
const RECENT_MONTHS: f64 = 3.0;
const DAYS_PER_MONTH: f64 = 30.0;

/// Elapsed 30-day months between the treatment and `today`. Negative for
/// future-dated treatments.
pub fn months_since(treatment: &Treatment, today: NaiveDate) -> Option<f64> {
    let applied = treatment.application_date?;
    Some((today - applied).num_days() as f64 / DAYS_PER_MONTH)
}

pub fn is_recent(treatment: &Treatment, today: NaiveDate) -> bool {
    months_since(treatment, today).is_some_and(|months| months <= RECENT_MONTHS)
}

/// Recent treatment rule
///
/// Most varroa and nosema treatments carry a withdrawal period during which
/// honey must not be harvested. Any treatment in the last ~90 days triggers
/// a single caution line.
pub struct RecentTreatmentRule;

impl Rule<HiveSnapshot> for RecentTreatmentRule {
    fn id(&self) -> &'static str {
        "recent_treatments"
    }

    fn name(&self) -> &'static str {
        "Recent Treatments"
    }

    fn evaluate(&self, hive: &HiveSnapshot, today: NaiveDate) -> Vec<AdvisoryLine> {
        let recent = hive
            .treatments
            .iter()
            .filter(|t| is_recent(t, today))
            .count();

        if recent == 0 {
            return Vec::new();
        }

        tracing::trace!(recent, "Recent treatments within withdrawal window");

        vec![AdvisoryLine::new(
            AdviceCategory::Treatment,
            Severity::Advisory,
            RECENT_TREATMENT,
        )]
    }
}
