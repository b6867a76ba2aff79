use super::{
    hive::{
        BroodPatternRule, DiseaseSignsRule, HoneyStoresRule, LocationRule, PestLevelRule,
        PopulationRule, QueenStatusRule, RecentTreatmentRule, SeasonRule, StrengthRule,
        HEALTHY_COLONY,
    },
    product::{
        MarketSeasonRule, OriginRule, ProductTypeRule, QualityGradeRule, QuantityRule,
        STEADY_PRODUCTION,
    },
    Rule,
};
use crate::models::{
    AdviceCategory, Advisory, AdvisoryLine, HiveSnapshot, ProductSnapshot, Severity,
};
use chrono::NaiveDate;

/// Ordered rule catalog for one kind of snapshot.
///
/// Every rule runs on every evaluation and lines accumulate in catalog
/// order. If nothing fires, the fallback line is the whole advisory.
pub struct RulesEngine<S> {
    rules: Vec<Box<dyn Rule<S>>>,
    fallback: &'static str,
}

impl<S> RulesEngine<S> {
    pub fn new(rules: Vec<Box<dyn Rule<S>>>, fallback: &'static str) -> Self {
        Self { rules, fallback }
    }

    pub fn evaluate(&self, subject: &S, today: NaiveDate) -> Advisory {
        let mut lines = Vec::new();

        for rule in &self.rules {
            let produced = rule.evaluate(subject, today);
            if !produced.is_empty() {
                tracing::debug!(rule = rule.id(), lines = produced.len(), "Rule fired");
            }
            lines.extend(produced);
        }

        if lines.is_empty() {
            tracing::debug!("No rule fired, using fallback");
            lines.push(AdvisoryLine::new(
                AdviceCategory::General,
                Severity::Info,
                self.fallback,
            ));
        }

        Advisory::new(lines)
    }

    pub fn evaluate_rule(&self, rule_id: &str, subject: &S, today: NaiveDate) -> Vec<AdvisoryLine> {
        self.rules
            .iter()
            .find(|r| r.id() == rule_id)
            .map(|rule| rule.evaluate(subject, today))
            .unwrap_or_default()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl RulesEngine<HiveSnapshot> {
    pub fn hive() -> Self {
        let rules: Vec<Box<dyn Rule<HiveSnapshot>>> = vec![
            Box::new(StrengthRule),
            Box::new(QueenStatusRule),
            Box::new(BroodPatternRule),
            Box::new(PopulationRule),
            Box::new(HoneyStoresRule),
            Box::new(PestLevelRule),
            Box::new(DiseaseSignsRule),
            Box::new(LocationRule),
            Box::new(RecentTreatmentRule),
            Box::new(SeasonRule),
        ];

        Self::new(rules, HEALTHY_COLONY)
    }
}

impl RulesEngine<ProductSnapshot> {
    pub fn product() -> Self {
        let rules: Vec<Box<dyn Rule<ProductSnapshot>>> = vec![
            Box::new(QuantityRule),
            Box::new(MarketSeasonRule),
            Box::new(ProductTypeRule),
            Box::new(QualityGradeRule),
            Box::new(OriginRule),
        ];

        Self::new(rules, STEADY_PRODUCTION)
    }
}

/// Advisory text for a hive, evaluated as of `today`.
pub fn generate_hive_recommendation(hive: &HiveSnapshot, today: NaiveDate) -> String {
    RulesEngine::hive().evaluate(hive, today).render()
}

/// Marketing advisory text for a product. Product rules key off the
/// snapshot's harvest date, so the result does not vary with `today`.
pub fn generate_product_recommendation(product: &ProductSnapshot, today: NaiveDate) -> String {
    RulesEngine::product().evaluate(product, today).render()
}
