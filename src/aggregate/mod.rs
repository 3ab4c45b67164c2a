//! Aggregation rules over country collections.

pub mod uk;

pub use uk::{merge_uk, UK_CONSTITUENTS, UNITED_KINGDOM};
