//! Sampling statistics for a project's share of a country's testers.
//!
//! The project members from a country are treated as a sample of size `n`
//! (all testers from that country) with `m` positives (those who joined the
//! project). The number of positives follows a hypergeometric distribution,
//! which is approximated by a normal distribution to get a 95% confidence
//! interval around p = m / n.
//!
//! # References
//! - Marcus Hudec, Christian Neumann: Stichproben und Umfragen
//! - Burt Gerstman: StatPrimer, estimation chapter

use crate::error::{FtmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-sided 95% quantile of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Point estimate and 95% margin of error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    /// Estimated proportion m / n.
    pub p: f64,
    /// Half-width of the 95% confidence interval.
    pub s: f64,
}

impl Probability {
    /// Lower bound of the confidence interval.
    pub fn lower(&self) -> f64 {
        self.p - self.s
    }

    /// Upper bound of the confidence interval.
    pub fn upper(&self) -> f64 {
        self.p + self.s
    }

    /// Signal-to-noise score, see [`quality`].
    pub fn quality(&self) -> f64 {
        quality(self.p, self.s)
    }
}

/// A sample size threshold, or a marker that the formula has no value.
///
/// The thresholds divide by p(1 - p), so they are not computable for p = 0
/// or p = 1 (or for p outside [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleSize {
    /// Number of individuals.
    Size(u64),
    /// Formula undefined for this proportion.
    NotComputable,
}

impl SampleSize {
    /// The size, if computable.
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Size(n) => Some(*n),
            Self::NotComputable => None,
        }
    }

    /// Check if a value is available.
    pub fn is_computable(&self) -> bool {
        matches!(self, Self::Size(_))
    }

    /// Check if a sample of size `n` reaches this threshold.
    ///
    /// Always false when the threshold is not computable.
    pub fn is_met_by(&self, n: f64) -> bool {
        match self {
            Self::Size(size) => n >= *size as f64,
            Self::NotComputable => false,
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(n) => write!(f, "{}", n),
            Self::NotComputable => write!(f, "NA"),
        }
    }
}

fn in_open_unit_interval(p: f64) -> bool {
    p > 0.0 && p < 1.0
}

/// Floor that treats values within rounding noise of an integer as that
/// integer, so 9 / (0.1 * 0.9) + 1 gives 101 rather than 100.
fn floor_snapped(x: f64) -> f64 {
    let nearest = x.round();
    if (x - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest
    } else {
        x.floor()
    }
}

/// Sizes too large for a `u64` are not computable rather than saturated.
fn to_sample_size(x: f64) -> SampleSize {
    let size = floor_snapped(x);
    if size.is_finite() && size < u64::MAX as f64 {
        SampleSize::Size(size as u64)
    } else {
        SampleSize::NotComputable
    }
}

/// Probability and 95% confidence margin for `m` positives out of a sample
/// of `n` individuals.
///
/// p = m / n, s = 1.96 * sqrt(p(1 - p) / n)
///
/// # Errors
/// `n` must be positive and finite, `m` must be non-negative.
pub fn probability(n: f64, m: f64) -> Result<Probability> {
    if !(n > 0.0 && n.is_finite()) {
        return Err(FtmError::InvalidParameter(format!(
            "Sample size must be positive, got {}",
            n
        )));
    }
    if !(m >= 0.0) {
        return Err(FtmError::InvalidParameter(format!(
            "Positive count must be non-negative, got {}",
            m
        )));
    }

    let p = m / n;
    let s = Z_95 * (p * (1.0 - p) / n).sqrt();
    Ok(Probability { p, s })
}

/// Minimal sample size for the normal approximation to be adequate.
///
/// Uses the rule of thumb n p (1 - p) >= 9:
/// size = floor(9 / (p (1 - p)) + 1)
pub fn min_sample_size(p: f64) -> SampleSize {
    if !in_open_unit_interval(p) {
        return SampleSize::NotComputable;
    }
    to_sample_size(9.0 / (p * (1.0 - p)) + 1.0)
}

/// Looser sample size at which the normal approximation is still acceptable.
///
/// Requires n p >= 4 and n (1 - p) >= 4:
/// size = floor(max(4 / p, 4 / (1 - p)) + 1)
pub fn acceptable_sample_size(p: f64) -> SampleSize {
    if !in_open_unit_interval(p) {
        return SampleSize::NotComputable;
    }
    let n = (4.0 / p).max(4.0 / (1.0 - p));
    to_sample_size(n + 1.0)
}

/// Point estimate divided by its margin of error.
///
/// Larger is better. A zero margin yields infinity (or NaN for p = 0),
/// which is passed through unchanged.
pub fn quality(p: f64, s: f64) -> f64 {
    p / s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_probability() {
        let prob = probability(100.0, 10.0).unwrap();
        assert_relative_eq!(prob.p, 0.10, epsilon = 1e-12);
        assert_relative_eq!(prob.s, 1.96 * (0.10_f64 * 0.90 / 100.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(prob.s, 0.0588, epsilon = 1e-4);
        assert_relative_eq!(prob.lower(), 0.10 - prob.s, epsilon = 1e-12);
    }

    #[test]
    fn test_probability_invalid_sample() {
        assert!(probability(0.0, 1.0).is_err());
        assert!(probability(-3.0, 1.0).is_err());
        assert!(probability(f64::NAN, 1.0).is_err());
        assert!(probability(10.0, -1.0).is_err());
    }

    #[test]
    fn test_min_sample_size() {
        assert_eq!(min_sample_size(0.10), SampleSize::Size(101));
        // 9 / 0.25 + 1 = 37
        assert_eq!(min_sample_size(0.5), SampleSize::Size(37));
    }

    #[test]
    fn test_acceptable_sample_size() {
        assert_eq!(acceptable_sample_size(0.10), SampleSize::Size(41));
        // Symmetric in p and 1 - p
        assert_eq!(acceptable_sample_size(0.90), SampleSize::Size(41));
        assert_eq!(acceptable_sample_size(0.3), SampleSize::Size(14));
    }

    #[test]
    fn test_floor_snapped() {
        assert_eq!(floor_snapped(100.99999999999999), 101.0);
        assert_eq!(floor_snapped(57.25), 57.0);
        assert_eq!(floor_snapped(41.49999999999999), 41.0);
    }

    #[test]
    fn test_degenerate_proportions_not_computable() {
        for p in [0.0, 1.0, 1.5, -0.1] {
            assert_eq!(min_sample_size(p), SampleSize::NotComputable);
            assert_eq!(acceptable_sample_size(p), SampleSize::NotComputable);
        }
        assert_eq!(SampleSize::NotComputable.to_string(), "NA");
        assert_eq!(SampleSize::NotComputable.value(), None);
    }

    #[test]
    fn test_tiny_proportion_not_saturated() {
        // One member against 1e20 testers needs more than u64::MAX.
        let prob = probability(1e20, 1.0).unwrap();
        assert_eq!(min_sample_size(prob.p), SampleSize::NotComputable);
        assert_eq!(acceptable_sample_size(prob.p), SampleSize::NotComputable);

        assert_eq!(acceptable_sample_size(1e-6), SampleSize::Size(4_000_001));
    }

    #[test]
    fn test_is_met_by() {
        assert!(SampleSize::Size(101).is_met_by(101.0));
        assert!(!SampleSize::Size(101).is_met_by(100.0));
        assert!(!SampleSize::NotComputable.is_met_by(1e9));
    }

    #[test]
    fn test_quality() {
        let prob = probability(100.0, 10.0).unwrap();
        assert_relative_eq!(prob.quality(), 0.10 / prob.s, epsilon = 1e-12);

        // Everyone tested: no sampling error, infinite quality.
        let all = probability(50.0, 50.0).unwrap();
        assert_eq!(all.s, 0.0);
        assert!(all.quality().is_infinite());
        assert!(quality(0.0, 0.0).is_nan());
    }
}
