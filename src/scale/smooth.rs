//! Logarithmic smoothing for display.

use crate::data::Frequency;

/// Apply log2(value + 1) to every entry.
///
/// Compresses the range of large counts so that maps and charts are not
/// dominated by a few countries. Zero stays zero.
pub fn scale_log(frequencies: &[Frequency]) -> Vec<Frequency> {
    frequencies
        .iter()
        .map(|f| Frequency::new(f.country.clone(), (f.value + 1.0).log2()))
        .collect()
}
