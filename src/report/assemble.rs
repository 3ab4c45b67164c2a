//! Ordering output rows and joining counts with totals.

use crate::data::{Frequency, StatReport, StatRow, TotalsTable};
use crate::error::{FtmError, Result};

/// Sort by value, largest first.
///
/// The sort is stable: countries with equal values keep their relative
/// input order.
pub fn sort_descending(frequencies: &mut [Frequency]) {
    frequencies.sort_by(|a, b| b.value.total_cmp(&a.value));
}

/// Owned variant of [`sort_descending`].
pub fn sorted_descending(mut frequencies: Vec<Frequency>) -> Vec<Frequency> {
    sort_descending(&mut frequencies);
    frequencies
}

/// Build the statistics report from absolute counts and known totals.
///
/// For every country with a positive count and a positive total, the total
/// is the sample size and the count is the number of positives. Other
/// countries are skipped. Rows are ordered by fraction, largest first,
/// keeping input order among ties.
///
/// `counts` must hold absolute counts, not scaled values; a fractional
/// count is an invalid-parameter error.
pub fn assemble_stats(counts: &[Frequency], totals: &TotalsTable) -> Result<StatReport> {
    let mut rows = Vec::with_capacity(counts.len());

    for freq in counts {
        if freq.value <= 0.0 {
            continue;
        }
        let Some(total) = totals.positive(&freq.country) else {
            log::debug!("{}: no usable total, skipped in statistics", freq.country);
            continue;
        };
        if freq.value.fract() != 0.0 {
            return Err(FtmError::InvalidParameter(format!(
                "{}: statistics need a whole count, got {}",
                freq.country, freq.value
            )));
        }
        rows.push(StatRow::new(freq.country.clone(), total, freq.value as u64)?);
    }

    rows.sort_by(|a, b| b.fraction.total_cmp(&a.fraction));
    Ok(StatReport::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn freqs(pairs: &[(&str, f64)]) -> Vec<Frequency> {
        pairs.iter().map(|&(c, v)| Frequency::new(c, v)).collect()
    }

    fn countries(f: &[Frequency]) -> Vec<&str> {
        f.iter().map(|f| f.country.as_str()).collect()
    }

    #[test]
    fn test_sort_descending() {
        let sorted = sorted_descending(freqs(&[("A", 1.0), ("B", 5.0), ("C", 3.0)]));
        assert_eq!(countries(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let sorted = sorted_descending(freqs(&[
            ("Wales", 1.0),
            ("France", 2.0),
            ("Belgium", 1.0),
            ("Spain", 2.0),
            ("Denmark", 1.0),
        ]));
        assert_eq!(
            countries(&sorted),
            vec!["France", "Spain", "Wales", "Belgium", "Denmark"]
        );
    }

    #[test]
    fn test_assemble_stats_skips_unknown() {
        let counts = freqs(&[("France", 2.0), ("Atlantis", 4.0), ("Spain", 1.0), ("Germany", 9.0)]);
        let totals = TotalsTable::from_pairs([("France", 12000.0), ("Spain", 0.0), ("Germany", 45000.0)]);

        let report = assemble_stats(&counts, &totals).unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.get("Atlantis").is_none());
        assert!(report.get("Spain").is_none());

        // 9 / 45000 = 0.0002 > 2 / 12000 = 0.000167
        assert_eq!(report.rows[0].country, "Germany");
        assert_relative_eq!(report.rows[0].fraction, 0.0002, epsilon = 1e-12);
        assert_eq!(report.rows[0].sample_size, 45000.0);
        assert_eq!(report.rows[0].positives, 9);
    }

    #[test]
    fn test_assemble_stats_rejects_scaled_values() {
        let scaled = freqs(&[("France", 0.016667)]);
        let err = assemble_stats(&scaled, &TotalsTable::example()).unwrap_err();
        assert!(matches!(err, FtmError::InvalidParameter(_)));
    }

    #[test]
    fn test_assemble_stats_empty() {
        let report = assemble_stats(&[], &TotalsTable::example()).unwrap();
        assert!(report.is_empty());
    }
}
