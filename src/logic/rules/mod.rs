pub mod engine;
pub mod hive;
pub mod product;

pub use engine::{generate_hive_recommendation, generate_product_recommendation, RulesEngine};

use crate::models::AdvisoryLine;
use chrono::NaiveDate;

/// Trait for advisory rules over a snapshot of type `S`
pub trait Rule<S>: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule against a snapshot. `today` is the evaluation date;
    /// rules that don't depend on the calendar ignore it.
    fn evaluate(&self, subject: &S, today: NaiveDate) -> Vec<AdvisoryLine>;
}
