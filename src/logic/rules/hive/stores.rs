use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, HiveSnapshot, Severity};
use chrono::NaiveDate;

pub const LOW_STORES: &str =
    "🍯 Low honey stores. Begin feeding program immediately, especially before winter.";
pub const EXCELLENT_STORES: &str =
    "🍯 Excellent honey stores! Consider harvest timing and leave adequate winter stores.";

const LOW_STORES_BELOW: i64 = 3;
const EXCELLENT_STORES_ABOVE: i64 = 15;

/// Honey stores rule
///
/// Stores are recorded as frames of capped honey. Under 3 the colony risks
/// starvation; over 15 there is a surplus worth planning a harvest around.
pub struct HoneyStoresRule;

impl Rule<HiveSnapshot> for HoneyStoresRule {
    fn id(&self) -> &'static str {
        "honey_stores"
    }

    fn name(&self) -> &'static str {
        "Honey Stores"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let stores = hive.honey_stores();

        if stores < LOW_STORES_BELOW {
            vec![AdvisoryLine::new(
                AdviceCategory::HoneyStores,
                Severity::Critical,
                LOW_STORES,
            )]
        } else if stores > EXCELLENT_STORES_ABOVE {
            vec![AdvisoryLine::new(
                AdviceCategory::HoneyStores,
                Severity::Info,
                EXCELLENT_STORES,
            )]
        } else {
            Vec::new()
        }
    }
}
