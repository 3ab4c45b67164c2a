//! Deduplicating country labels into per-country counts.

use crate::data::{Frequency, Roster, TotalsTable};
use std::collections::HashMap;

/// Number of project members per country.
///
/// Keys are exact (case-sensitive) trimmed labels. Countries that never
/// occur have no entry. Iteration follows first occurrence, but callers
/// must not rely on it for output ordering; see [`crate::report`].
#[derive(Debug, Clone, Default)]
pub struct CountryTally {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl CountryTally {
    /// Count occurrences of each label.
    ///
    /// Labels are trimmed; empty labels are ignored.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Self::default();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            match tally.counts.get_mut(label) {
                Some(count) => *count += 1,
                None => {
                    tally.counts.insert(label.to_string(), 1);
                    tally.order.push(label.to_string());
                }
            }
        }
        tally
    }

    /// Count the countries of a project roster.
    pub fn from_roster(roster: &Roster) -> Self {
        Self::from_labels(roster.labels())
    }

    /// Count for a country, if present.
    pub fn get(&self, country: &str) -> Option<u64> {
        self.counts.get(country).copied()
    }

    /// Number of distinct countries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over (country, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order
            .iter()
            .map(move |country| (country.as_str(), self.counts[country]))
    }

    /// Keep only countries with a positive known total.
    pub fn restrict_to(&self, totals: &TotalsTable) -> Self {
        let order: Vec<String> = self
            .order
            .iter()
            .filter(|country| totals.positive(country).is_some())
            .cloned()
            .collect();
        let counts = order
            .iter()
            .map(|country| (country.clone(), self.counts[country]))
            .collect();
        Self { counts, order }
    }

    /// Convert to an ordered frequency collection for the later stages.
    pub fn to_frequencies(&self) -> Vec<Frequency> {
        self.iter()
            .map(|(country, count)| Frequency::new(country, count as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let tally = CountryTally::from_labels(["France", "France", "Germany", "England", "Scotland"]);
        assert_eq!(tally.len(), 4);
        assert_eq!(tally.get("France"), Some(2));
        assert_eq!(tally.get("Germany"), Some(1));
        assert_eq!(tally.get("Spain"), None);
    }

    #[test]
    fn test_total_matches_nonempty_labels() {
        let labels = [" Norway", "", "Norway ", "  ", "Sweden", "norway"];
        let tally = CountryTally::from_labels(labels);

        let nonempty = labels.iter().filter(|l| !l.trim().is_empty()).count() as u64;
        assert_eq!(tally.total(), nonempty);
        // Case-sensitive
        assert_eq!(tally.get("Norway"), Some(2));
        assert_eq!(tally.get("norway"), Some(1));
    }

    #[test]
    fn test_first_occurrence_order() {
        let tally = CountryTally::from_labels(["Spain", "Denmark", "Spain", "Belgium"]);
        let countries: Vec<&str> = tally.iter().map(|(c, _)| c).collect();
        assert_eq!(countries, vec!["Spain", "Denmark", "Belgium"]);
    }

    #[test]
    fn test_restrict_to_totals() {
        let tally = CountryTally::from_labels(["France", "Atlantis", "Spain", "France"]);
        let totals = TotalsTable::from_pairs([("France", 12000.0), ("Spain", 0.0)]);

        let known = tally.restrict_to(&totals);
        assert_eq!(known.len(), 1);
        assert_eq!(known.get("France"), Some(2));
        assert_eq!(known.get("Spain"), None);
    }

    #[test]
    fn test_to_frequencies() {
        let tally = CountryTally::from_labels(["Ireland", "Ireland"]);
        assert_eq!(tally.to_frequencies(), vec![Frequency::new("Ireland", 2.0)]);
    }
}
