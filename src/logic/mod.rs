pub mod report;
pub mod rules;

pub use rules::{generate_hive_recommendation, generate_product_recommendation, RulesEngine};
