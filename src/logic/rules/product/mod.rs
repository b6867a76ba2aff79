pub mod marketing;
pub mod product_type;
pub mod production;

pub use marketing::{OriginRule, QualityGradeRule};
pub use product_type::ProductTypeRule;
pub use production::{MarketSeasonRule, QuantityRule};

/// Emitted when no product rule produced a line.
pub const STEADY_PRODUCTION: &str = "✅ Steady production – maintain current strategy.";
