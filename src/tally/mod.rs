//! Per-country participant counts.

mod count;

pub use count::CountryTally;
