pub mod coerce;
pub mod hive;
pub mod product;
pub mod recommendation;

pub use hive::*;
pub use product::*;
pub use recommendation::*;
