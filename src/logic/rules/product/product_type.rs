use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, ProductSnapshot, ProductType, Severity};
use chrono::NaiveDate;

pub const HONEY_MARKETING: &str =
    "🍯 Honey products sell best when marketed with their floral source.";
pub const LOW_MOISTURE: &str =
    "✅ Excellent moisture content - this honey will have a longer shelf life.";
pub const HIGH_MOISTURE: &str =
    "⚠️ Higher moisture content - consider proper storage to prevent fermentation.";
pub const BEESWAX_MARKETING: &str =
    "🕯️ Beeswax is popular for candles and cosmetics - highlight purity in marketing.";
pub const PROPOLIS_MARKETING: &str =
    "🌿 Propolis has medicinal properties - market to health-conscious consumers.";
pub const ROYAL_JELLY_MARKETING: &str =
    "👑 Royal Jelly is a premium product - target specialty health stores.";
pub const POLLEN_MARKETING: &str =
    "🌼 Bee pollen is a superfood - emphasize nutritional benefits in marketing.";

/// Honey under 18% moisture keeps; over 20% risks fermenting.
const DRY_HONEY_BELOW: f64 = 18.0;
const WET_HONEY_ABOVE: f64 = 20.0;

pub fn wax_color_note(color: &str) -> String {
    format!(
        "🎨 The {} color of your wax is attractive for craft projects.",
        color
    )
}

pub fn pollen_source_note(source: &str) -> String {
    format!(
        "🌸 Your pollen from {} sources adds unique selling points.",
        source
    )
}

/// Product type rule
///
/// Exactly one branch runs per product type. Honey, beeswax and pollen add
/// a second line when their type-specific attribute is present.
pub struct ProductTypeRule;

impl ProductTypeRule {
    fn honey(product: &ProductSnapshot) -> Vec<AdvisoryLine> {
        let mut lines = vec![line(Severity::Info, HONEY_MARKETING)];

        match product.moisture_content {
            Some(m) if m < DRY_HONEY_BELOW => lines.push(line(Severity::Info, LOW_MOISTURE)),
            Some(m) if m > WET_HONEY_ABOVE => lines.push(line(Severity::Warning, HIGH_MOISTURE)),
            _ => {}
        }

        lines
    }

    fn beeswax(product: &ProductSnapshot) -> Vec<AdvisoryLine> {
        let mut lines = vec![line(Severity::Info, BEESWAX_MARKETING)];
        if let Some(color) = product.wax_color() {
            lines.push(line(Severity::Info, wax_color_note(color)));
        }
        lines
    }

    fn bee_pollen(product: &ProductSnapshot) -> Vec<AdvisoryLine> {
        let mut lines = vec![line(Severity::Info, POLLEN_MARKETING)];
        if let Some(source) = product.pollen_source() {
            lines.push(line(Severity::Info, pollen_source_note(source)));
        }
        lines
    }
}

fn line(severity: Severity, text: impl Into<String>) -> AdvisoryLine {
    AdvisoryLine::new(AdviceCategory::ProductType, severity, text)
}

impl Rule<ProductSnapshot> for ProductTypeRule {
    fn id(&self) -> &'static str {
        "product_type"
    }

    fn name(&self) -> &'static str {
        "Product Marketing"
    }

    fn evaluate(&self, product: &ProductSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        match product.product_type {
            Some(ProductType::Honey) => Self::honey(product),
            Some(ProductType::Beeswax) => Self::beeswax(product),
            Some(ProductType::Propolis) => vec![line(Severity::Info, PROPOLIS_MARKETING)],
            Some(ProductType::RoyalJelly) => vec![line(Severity::Info, ROYAL_JELLY_MARKETING)],
            Some(ProductType::BeePollen) => Self::bee_pollen(product),
            Some(ProductType::Other) | None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(product: &ProductSnapshot) -> Vec<String> {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        ProductTypeRule
            .evaluate(product, today)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    fn honey() -> ProductSnapshot {
        ProductSnapshot::new("Wildflower Honey", ProductType::Honey, 40)
    }

    #[test]
    fn honey_without_moisture() {
        assert_eq!(evaluate(&honey()), vec![HONEY_MARKETING]);
    }

    #[test]
    fn honey_moisture_bands() {
        assert_eq!(
            evaluate(&honey().with_moisture(15.0)),
            vec![HONEY_MARKETING, LOW_MOISTURE]
        );
        assert_eq!(evaluate(&honey().with_moisture(18.0)), vec![HONEY_MARKETING]);
        assert_eq!(evaluate(&honey().with_moisture(20.0)), vec![HONEY_MARKETING]);
        assert_eq!(
            evaluate(&honey().with_moisture(21.5)),
            vec![HONEY_MARKETING, HIGH_MOISTURE]
        );
    }

    #[test]
    fn beeswax_names_its_color() {
        let wax = ProductSnapshot::new("Cappings Wax", ProductType::Beeswax, 5)
            .with_wax_color("golden yellow");
        assert_eq!(
            evaluate(&wax),
            vec![
                BEESWAX_MARKETING.to_string(),
                "🎨 The golden yellow color of your wax is attractive for craft projects."
                    .to_string()
            ]
        );

        let plain = ProductSnapshot::new("Cappings Wax", ProductType::Beeswax, 5);
        assert_eq!(evaluate(&plain), vec![BEESWAX_MARKETING]);
    }

    #[test]
    fn pollen_names_its_source() {
        let pollen = ProductSnapshot::new("Spring Pollen", ProductType::BeePollen, 3)
            .with_pollen_source("clover");
        assert_eq!(
            evaluate(&pollen),
            vec![
                POLLEN_MARKETING.to_string(),
                "🌸 Your pollen from clover sources adds unique selling points.".to_string()
            ]
        );
    }

    #[test]
    fn single_line_types() {
        let propolis = ProductSnapshot::new("Tincture", ProductType::Propolis, 1);
        assert_eq!(evaluate(&propolis), vec![PROPOLIS_MARKETING]);

        let jelly = ProductSnapshot::new("Fresh Jelly", ProductType::RoyalJelly, 1);
        assert_eq!(evaluate(&jelly), vec![ROYAL_JELLY_MARKETING]);
    }

    #[test]
    fn attributes_of_other_types_are_ignored() {
        // Moisture only matters for honey
        let propolis = ProductSnapshot::new("Tincture", ProductType::Propolis, 1)
            .with_moisture(25.0)
            .with_wax_color("amber");
        assert_eq!(evaluate(&propolis), vec![PROPOLIS_MARKETING]);
    }

    #[test]
    fn other_and_unrecognized_types_are_silent() {
        let other = ProductSnapshot::new("Hive Tool", ProductType::Other, 1);
        assert!(evaluate(&other).is_empty());

        let mead: ProductSnapshot = serde_json::from_str(r#"{"productType": "Mead"}"#).unwrap();
        assert!(evaluate(&mead).is_empty());
    }
}
