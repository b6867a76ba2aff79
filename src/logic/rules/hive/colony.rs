use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, HiveSnapshot, Severity};
use chrono::NaiveDate;

pub const WEAK_COLONY: &str =
    "⚠️ Weak colony detected. Consider feeding with sugar syrup and monitor closely for queen issues.";
pub const STRONG_COLONY: &str =
    "💪 Strong colony! Monitor for swarming behavior and ensure adequate space.";
pub const LOW_POPULATION: &str =
    "📉 Low population. Consider combining with stronger colony or providing feeding support.";
pub const HIGH_POPULATION: &str =
    "📈 High population. Prepare for possible swarming - add supers or consider splitting.";

const WEAK_STRENGTH_MAX: i64 = 3;
const STRONG_STRENGTH_MIN: i64 = 8;
const LOW_POPULATION_BELOW: i64 = 15_000;
const HIGH_POPULATION_ABOVE: i64 = 50_000;

/// Colony strength rule
///
/// Strength is the inspector's 1-10 rating of frames covered by bees.
/// Weak colonies (3 or less) need feeding and a queen check; strong ones
/// (8 or more) are swarm candidates. The middle band is silent.
pub struct StrengthRule;

impl Rule<HiveSnapshot> for StrengthRule {
    fn id(&self) -> &'static str {
        "colony_strength"
    }

    fn name(&self) -> &'static str {
        "Colony Strength"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let strength = hive.strength();

        if strength <= WEAK_STRENGTH_MAX {
            vec![AdvisoryLine::new(
                AdviceCategory::Strength,
                Severity::Warning,
                WEAK_COLONY,
            )]
        } else if strength >= STRONG_STRENGTH_MIN {
            vec![AdvisoryLine::new(
                AdviceCategory::Strength,
                Severity::Advisory,
                STRONG_COLONY,
            )]
        } else {
            Vec::new()
        }
    }
}

/// Population rule
///
/// Below 15,000 bees a colony struggles to thermoregulate; above 50,000 it
/// is likely preparing to swarm. Both bounds are exclusive.
pub struct PopulationRule;

impl Rule<HiveSnapshot> for PopulationRule {
    fn id(&self) -> &'static str {
        "population"
    }

    fn name(&self) -> &'static str {
        "Colony Population"
    }

    fn evaluate(&self, hive: &HiveSnapshot, _today: NaiveDate) -> Vec<AdvisoryLine> {
        let population = hive.population();

        if population < LOW_POPULATION_BELOW {
            vec![AdvisoryLine::new(
                AdviceCategory::Population,
                Severity::Warning,
                LOW_POPULATION,
            )]
        } else if population > HIGH_POPULATION_ABOVE {
            vec![AdvisoryLine::new(
                AdviceCategory::Population,
                Severity::Advisory,
                HIGH_POPULATION,
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn texts(lines: Vec<AdvisoryLine>) -> Vec<String> {
        lines.into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn weak_strengths_warn() {
        for strength in 1..=3 {
            let hive = HiveSnapshot::default().with_strength(strength);
            assert_eq!(
                texts(StrengthRule.evaluate(&hive, today())),
                vec![WEAK_COLONY],
                "strength {}",
                strength
            );
        }
    }

    #[test]
    fn strong_strengths_note_swarming() {
        for strength in 8..=10 {
            let hive = HiveSnapshot::default().with_strength(strength);
            assert_eq!(
                texts(StrengthRule.evaluate(&hive, today())),
                vec![STRONG_COLONY],
                "strength {}",
                strength
            );
        }
    }

    #[test]
    fn middle_strengths_are_silent() {
        for strength in 4..=7 {
            let hive = HiveSnapshot::default().with_strength(strength);
            assert!(StrengthRule.evaluate(&hive, today()).is_empty());
        }
    }

    #[test]
    fn missing_strength_uses_default() {
        // Default strength of 5 sits in the silent band
        assert!(StrengthRule
            .evaluate(&HiveSnapshot::default(), today())
            .is_empty());
    }

    #[test]
    fn population_bounds_are_exclusive() {
        let cases = [
            (14_999, Some(LOW_POPULATION)),
            (15_000, None),
            (50_000, None),
            (50_001, Some(HIGH_POPULATION)),
            (0, Some(LOW_POPULATION)),
        ];

        for (population, expected) in cases {
            let hive = HiveSnapshot::default().with_population(population);
            let lines = texts(PopulationRule.evaluate(&hive, today()));
            assert_eq!(
                lines,
                expected.into_iter().map(String::from).collect::<Vec<_>>(),
                "population {}",
                population
            );
        }
    }

    #[test]
    fn missing_population_is_silent() {
        assert!(PopulationRule
            .evaluate(&HiveSnapshot::default(), today())
            .is_empty());
    }
}
