//! Family Tree DNA project frequencies
//!
//! This library estimates, per country, which share of all DNA testers from
//! that country joined a Family Tree DNA project, and how trustworthy each
//! estimate is.
//!
//! # Overview
//!
//! The library is organized into small modules:
//!
//! - **data**: Core data structures (Roster, TotalsTable, Frequency, StatRow)
//! - **tally**: Per-country participant counts
//! - **aggregate**: United Kingdom merging rule
//! - **scale**: Relative and logarithmic scaling
//! - **stats**: Sampling statistics (confidence margin, sample sizes)
//! - **report**: Ordering and delimited output
//! - **pipeline**: Pipeline composition and execution
//!
//! # Example
//!
//! ```no_run
//! use familytreemap::prelude::*;
//!
//! let roster = Roster::from_csv("project.csv", RosterOptions::default()).unwrap();
//! let totals = TotalsTable::from_path("testers.json").unwrap();
//!
//! let output = Pipeline::new()
//!     .merge_uk()
//!     .scale_relative()
//!     .with_stats()
//!     .run(&roster, &totals)
//!     .unwrap();
//!
//! frequencies_to_csv("frequencies.csv", &output.frequencies).unwrap();
//! ```

pub mod aggregate;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scale;
pub mod stats;
pub mod tally;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::aggregate::{merge_uk, UK_CONSTITUENTS, UNITED_KINGDOM};
    pub use crate::data::{
        Frequency, Roster, RosterOptions, StatReport, StatRow, TotalsTable,
    };
    pub use crate::error::{FtmError, Result};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineOutput, PipelineStep, ScaleMode};
    pub use crate::report::{
        assemble_stats, frequencies_to_csv, sort_descending, sorted_descending, tally_to_csv,
    };
    pub use crate::scale::{scale_log, scale_relative};
    pub use crate::stats::{
        acceptable_sample_size, min_sample_size, probability, quality, Probability, SampleSize,
    };
    pub use crate::tally::CountryTally;
}
