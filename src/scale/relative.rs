//! Relative frequencies against known tester totals.
//!
//! For country c: relative(c) = 100 * count(c) / total(c)
//!
//! The result is the percentage of all testers from that country who are
//! members of the project.

use crate::data::{Frequency, TotalsTable};

/// Convert absolute counts into percentages of the known totals.
///
/// Countries that are missing from `totals`, or whose total is zero or
/// below, are left out of the result entirely rather than reported as 0.
/// Input order is preserved for the remaining countries.
///
/// If the counts were UK-merged, `totals` must have been merged as well so
/// that numerator and denominator cover the same region.
pub fn scale_relative(counts: &[Frequency], totals: &TotalsTable) -> Vec<Frequency> {
    counts
        .iter()
        .filter_map(|freq| match totals.positive(&freq.country) {
            Some(total) => Some(Frequency::new(
                freq.country.clone(),
                100.0 * freq.value / total,
            )),
            None => {
                log::debug!("No usable total for {}, leaving it out", freq.country);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value_of;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentages() {
        let counts = vec![Frequency::new("France", 2.0), Frequency::new("Germany", 9.0)];
        let totals = TotalsTable::from_pairs([("France", 12000.0), ("Germany", 45000.0)]);

        let rel = scale_relative(&counts, &totals);
        assert_relative_eq!(value_of(&rel, "France").unwrap(), 200.0 / 12000.0, epsilon = 1e-12);
        assert_relative_eq!(value_of(&rel, "Germany").unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_and_nonpositive_totals_are_absent() {
        let counts = vec![
            Frequency::new("Atlantis", 3.0),
            Frequency::new("Spain", 1.0),
            Frequency::new("Norway", 1.0),
            Frequency::new("Sweden", 4.0),
        ];
        let totals = TotalsTable::from_pairs([("Spain", 0.0), ("Norway", -5.0), ("Sweden", 8000.0)]);

        let rel = scale_relative(&counts, &totals);
        assert_eq!(rel.len(), 1);
        assert_eq!(rel[0].country, "Sweden");
        assert_relative_eq!(rel[0].value, 0.05, epsilon = 1e-12);
    }
}
