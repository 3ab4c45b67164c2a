//! United Kingdom aggregation rule.
//!
//! Project members often give a constituent country rather than the United
//! Kingdom. [`merge_uk`] adds the constituent values into a single United
//! Kingdom entry so that it can be compared against UK-wide totals.
//!
//! # Known hazard
//!
//! The constituent entries are left in place: the merge only redirects their
//! sum into the United Kingdom slot. Merging the same collection twice counts
//! the constituents twice, and the constituent rows still show up in any
//! output derived from the merged collection.

use crate::data::Frequency;

/// Name of the aggregate entry.
pub const UNITED_KINGDOM: &str = "United Kingdom";

/// Constituent countries folded into [`UNITED_KINGDOM`].
pub const UK_CONSTITUENTS: [&str; 4] = ["England", "Wales", "Scotland", "Northern Ireland"];

/// Sum England, Wales, Scotland, Northern Ireland and any existing United
/// Kingdom value into a single United Kingdom entry.
///
/// - An existing United Kingdom entry is overwritten with the sum and keeps
///   its position.
/// - Otherwise a new entry is appended if the sum is greater than zero.
/// - Constituent entries are not removed.
///
/// Returns the merged United Kingdom value, or `None` if nothing was written.
pub fn merge_uk(frequencies: &mut Vec<Frequency>) -> Option<f64> {
    let mut uk_idx = None;
    let mut sum = 0.0;

    for (idx, freq) in frequencies.iter().enumerate() {
        if freq.country == UNITED_KINGDOM {
            uk_idx = Some(idx);
            sum += freq.value;
        } else if UK_CONSTITUENTS.contains(&freq.country.as_str()) {
            sum += freq.value;
        }
    }

    match uk_idx {
        Some(idx) => {
            frequencies[idx].value = sum;
            Some(sum)
        }
        None if sum > 0.0 => {
            frequencies.push(Frequency::new(UNITED_KINGDOM, sum));
            Some(sum)
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value_of;

    fn freqs(pairs: &[(&str, f64)]) -> Vec<Frequency> {
        pairs.iter().map(|&(c, v)| Frequency::new(c, v)).collect()
    }

    #[test]
    fn test_appends_when_absent() {
        let mut f = freqs(&[("France", 2.0), ("England", 1.0), ("Scotland", 1.0)]);
        assert_eq!(merge_uk(&mut f), Some(2.0));

        assert_eq!(f.len(), 4);
        assert_eq!(f[3], Frequency::new(UNITED_KINGDOM, 2.0));
    }

    #[test]
    fn test_constituents_persist_unchanged() {
        let mut f = freqs(&[("England", 3.0), ("Wales", 2.0), ("Northern Ireland", 1.0)]);
        merge_uk(&mut f);

        assert_eq!(value_of(&f, "England"), Some(3.0));
        assert_eq!(value_of(&f, "Wales"), Some(2.0));
        assert_eq!(value_of(&f, "Northern Ireland"), Some(1.0));
        assert_eq!(value_of(&f, UNITED_KINGDOM), Some(6.0));
    }

    #[test]
    fn test_overwrites_existing_in_place() {
        let mut f = freqs(&[("Wales", 1.0), (UNITED_KINGDOM, 4.0), ("Ireland", 7.0)]);
        assert_eq!(merge_uk(&mut f), Some(5.0));

        assert_eq!(f.len(), 3);
        assert_eq!(f[1], Frequency::new(UNITED_KINGDOM, 5.0));
        assert_eq!(f[0], Frequency::new("Wales", 1.0));
    }

    #[test]
    fn test_noop_without_regions() {
        let mut f = freqs(&[("France", 2.0), ("Germany", 1.0)]);
        assert_eq!(merge_uk(&mut f), None);
        assert_eq!(f, freqs(&[("France", 2.0), ("Germany", 1.0)]));
    }

    #[test]
    fn test_second_merge_double_counts() {
        let mut f = freqs(&[("England", 1.0), ("Scotland", 1.0)]);
        merge_uk(&mut f);
        merge_uk(&mut f);

        // The first merge's total is added to the constituents again.
        assert_eq!(value_of(&f, UNITED_KINGDOM), Some(4.0));
        assert_eq!(f.len(), 3);
    }
}
