//! Data structures for project frequency analysis.

mod frequency;
mod roster;
mod stat_row;
mod totals;

pub use frequency::{value_of, Frequency};
pub use roster::{Roster, RosterOptions};
pub use stat_row::{StatReport, StatRow};
pub use totals::TotalsTable;
