//! Value transforms applied to country frequencies.
//!
//! - **Relative**: percentage of the known number of testers per country
//! - **Smooth**: log2(x + 1) compression for display
//!
//! The two are alternative output modes and are not combined.

pub mod relative;
pub mod smooth;

pub use relative::scale_relative;
pub use smooth::scale_log;
