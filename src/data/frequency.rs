//! Country/value pairs flowing between pipeline stages.

use serde::{Deserialize, Serialize};

/// A value attached to a country.
///
/// Depending on the stage that produced it, `value` is a raw tester count,
/// a percentage of the country's total testers, or a log-scaled count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    /// Country name, trimmed.
    pub country: String,
    /// Non-negative value.
    pub value: f64,
}

impl Frequency {
    /// Create a new frequency entry.
    pub fn new(country: impl Into<String>, value: f64) -> Self {
        Self {
            country: country.into(),
            value,
        }
    }
}

/// Look up the value recorded for a country in an ordered collection.
pub fn value_of(frequencies: &[Frequency], country: &str) -> Option<f64> {
    frequencies
        .iter()
        .find(|f| f.country == country)
        .map(|f| f.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of() {
        let freqs = vec![Frequency::new("France", 2.0), Frequency::new("Germany", 1.0)];
        assert_eq!(value_of(&freqs, "Germany"), Some(1.0));
        assert_eq!(value_of(&freqs, "Spain"), None);
    }
}
