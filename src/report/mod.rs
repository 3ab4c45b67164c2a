//! Report assembly and output.
//!
//! Tallies and totals are hash-keyed and carry no ordering guarantee, so
//! every report is put in order here by an explicit stable sort.

mod assemble;
mod write;

pub use assemble::{assemble_stats, sort_descending, sorted_descending};
pub use write::{
    frequencies_to_csv, tally_to_csv, totals_to_csv, write_frequencies, write_stats, write_tally,
    FREQUENCY_HEADER, STATS_HEADER, TALLY_HEADER,
};
