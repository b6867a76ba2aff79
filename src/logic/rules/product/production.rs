use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, ProductSnapshot, Severity};
use chrono::NaiveDate;

pub const HIGH_PRODUCTION: &str = "📈 High production detected – consider expanding market reach.";
pub const LOW_PRODUCTION: &str =
    "📉 Low production – explore reasons such as hive health or season.";
pub const SPRING_DEMAND: &str = "🌸 Spring trend: Honey demand usually increases – stock up.";
pub const HOLIDAY_SEASON: &str = "🎄 Holiday season: Pack honey in gift sets for higher sales.";

const HIGH_QUANTITY_ABOVE: i64 = 100;
const LOW_QUANTITY_BELOW: i64 = 20;

/// Harvest quantity rule
pub struct QuantityRule;

impl Rule<ProductSnapshot> for QuantityRule {
    fn id(&self) -> &'static str {
        "quantity"
    }

    fn name(&self) -> &'static str {
        "Production Volume"
    }

    fn evaluate(&self, product: &ProductSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let quantity = product.quantity();

        if quantity > HIGH_QUANTITY_ABOVE {
            vec![AdvisoryLine::new(
                AdviceCategory::Production,
                Severity::Info,
                HIGH_PRODUCTION,
            )]
        } else if quantity < LOW_QUANTITY_BELOW {
            vec![AdvisoryLine::new(
                AdviceCategory::Production,
                Severity::Advisory,
                LOW_PRODUCTION,
            )]
        } else {
            Vec::new()
        }
    }
}

/// Market timing rule
///
/// Keyed on the harvest month, not the evaluation date. Only March/April
/// (spring demand) and December (gift season) produce a note; there is no
/// general seasonal fallback.
pub struct MarketSeasonRule;

impl Rule<ProductSnapshot> for MarketSeasonRule {
    fn id(&self) -> &'static str {
        "market_season"
    }

    fn name(&self) -> &'static str {
        "Market Timing"
    }

    fn evaluate(&self, product: &ProductSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let text = match product.harvest_month() {
            Some(3) | Some(4) => SPRING_DEMAND,
            Some(12) => HOLIDAY_SEASON,
            _ => return Vec::new(),
        };

        vec![AdvisoryLine::new(AdviceCategory::Market, Severity::Info, text)]
    }
}
