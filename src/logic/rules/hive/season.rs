use crate::logic::rules::Rule;
use crate::models::{AdviceCategory, AdvisoryLine, HiveSnapshot, Severity};
use chrono::{Datelike, NaiveDate};

pub const SPRING: &str =
    "🌸 Spring season: Monitor for swarm cells, provide adequate space, and check food stores.";
pub const SUMMER: &str = "☀️ Summer season: Ensure proper ventilation, monitor for honey flow, and maintain pest control.";
pub const FALL: &str = "🍂 Fall season: Prepare for winter, reduce hive size, and ensure adequate food stores (20+ lbs honey).";
pub const WINTER: &str =
    "❄️ Winter season: Minimize disturbances, ensure ventilation, and monitor entrance for debris.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeeSeason {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl BeeSeason {
    /// Fixed calendar mapping (northern hemisphere months).
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => BeeSeason::Spring,
            6..=8 => BeeSeason::Summer,
            9..=11 => BeeSeason::Fall,
            _ => BeeSeason::Winter,
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            BeeSeason::Spring => SPRING,
            BeeSeason::Summer => SUMMER,
            BeeSeason::Fall => FALL,
            BeeSeason::Winter => WINTER,
        }
    }
}

/// Seasonal management rule. Exactly one line fires for every date.
pub struct SeasonRule;

impl Rule<HiveSnapshot> for SeasonRule {
    fn id(&self) -> &'static str {
        "season"
    }

    fn name(&self) -> &'static str {
        "Seasonal Management"
    }

    fn evaluate(&self, _hive: &HiveSnapshot, today: NaiveDate) -> Vec<AdvisoryLine> {
        let season = BeeSeason::from_month(today.month());
        vec![AdvisoryLine::new(
            AdviceCategory::Season,
            Severity::Info,
            season.advice(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_mapping() {
        let expected = [
            (1, BeeSeason::Winter),
            (2, BeeSeason::Winter),
            (3, BeeSeason::Spring),
            (5, BeeSeason::Spring),
            (6, BeeSeason::Summer),
            (8, BeeSeason::Summer),
            (9, BeeSeason::Fall),
            (11, BeeSeason::Fall),
            (12, BeeSeason::Winter),
        ];
        for (month, season) in expected {
            assert_eq!(BeeSeason::from_month(month), season, "month {}", month);
        }
    }

    #[test]
    fn exactly_one_line_every_month() {
        for month in 1..=12 {
            let today = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            let lines = SeasonRule.evaluate(&HiveSnapshot::default(), today);
            assert_eq!(lines.len(), 1, "month {}", month);
        }
    }

    #[test]
    fn april_is_spring() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let lines = SeasonRule.evaluate(&HiveSnapshot::default(), today);
        assert_eq!(lines[0].text, SPRING);
    }
}
