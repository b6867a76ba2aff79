pub mod colony;
pub mod health;
pub mod queen;
pub mod season;
pub mod site;
pub mod stores;
pub mod treatments;

pub use colony::{PopulationRule, StrengthRule};
pub use health::{DiseaseSignsRule, PestLevelRule};
pub use queen::{BroodPatternRule, QueenStatusRule};
pub use season::SeasonRule;
pub use site::LocationRule;
pub use stores::HoneyStoresRule;
pub use treatments::RecentTreatmentRule;

/// Emitted when no hive rule produced a line.
pub const HEALTHY_COLONY: &str =
    "✅ Colony appears healthy! Continue regular inspections every 7-14 days during active season.";
