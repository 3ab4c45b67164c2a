//! Per-country statistics rows.

use crate::error::Result;
use crate::report::write_stats;
use crate::stats::{acceptable_sample_size, min_sample_size, probability, SampleSize};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Participation estimate for one country.
///
/// The sample is everyone from the country who has tested; the positives
/// are the project members from that country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    /// Country name.
    pub country: String,
    /// Known number of testers from the country.
    pub sample_size: f64,
    /// Project members from the country.
    pub positives: u64,
    /// Estimated participation rate p.
    pub fraction: f64,
    /// 95% margin of error s.
    pub margin_of_error: f64,
    /// p / s. Infinite when s is zero.
    pub quality: f64,
    /// Sample size needed for n p (1 - p) >= 9.
    pub min_sample_size: SampleSize,
    /// Sample size needed for n p >= 4 and n (1 - p) >= 4.
    pub acceptable_sample_size: SampleSize,
}

impl StatRow {
    /// Compute the statistics for `positives` out of `sample_size`.
    ///
    /// # Errors
    /// Fails if `sample_size` is not positive.
    pub fn new(country: impl Into<String>, sample_size: f64, positives: u64) -> Result<Self> {
        let country = country.into();
        let prob = probability(sample_size, positives as f64)?;
        let min_sample_size = min_sample_size(prob.p);
        let acceptable_sample_size = acceptable_sample_size(prob.p);

        if !min_sample_size.is_computable() {
            log::warn!(
                "{}: sample sizes not computable for fraction {} ({} of {})",
                country,
                prob.p,
                positives,
                sample_size
            );
        }

        Ok(Self {
            country,
            sample_size,
            positives,
            fraction: prob.p,
            margin_of_error: prob.s,
            quality: prob.quality(),
            min_sample_size,
            acceptable_sample_size,
        })
    }

    /// Check if the sample is large enough for the strict normal approximation.
    pub fn is_adequate(&self) -> bool {
        self.min_sample_size.is_met_by(self.sample_size)
    }

    /// Check if the sample is large enough for the looser approximation.
    pub fn is_acceptable(&self) -> bool {
        self.acceptable_sample_size.is_met_by(self.sample_size)
    }
}

/// Ordered collection of statistics rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatReport {
    pub rows: Vec<StatRow>,
}

impl StatReport {
    /// Create a report from rows in output order.
    pub fn new(rows: Vec<StatRow>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a country.
    pub fn get(&self, country: &str) -> Option<&StatRow> {
        self.rows.iter().find(|r| r.country == country)
    }

    /// Rows whose sample is below the acceptable size.
    pub fn unreliable(&self) -> Vec<&StatRow> {
        self.rows.iter().filter(|r| !r.is_acceptable()).collect()
    }

    /// Iterate over rows.
    pub fn iter(&self) -> impl Iterator<Item = &StatRow> {
        self.rows.iter()
    }

    /// Write the report as comma-delimited text.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        write_stats(file, &self.rows)
    }
}
