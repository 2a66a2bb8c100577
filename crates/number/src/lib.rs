pub mod serialization;
pub mod units;
