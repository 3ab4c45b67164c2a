//! Known number of testers per country.

use crate::aggregate::merge_uk;
use crate::data::Frequency;
use crate::error::{FtmError, Result};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

/// Known total number of testers per country.
///
/// This is the denominator for relative frequencies and the sample size for
/// the sampling statistics. Entries with a total of zero or below are kept
/// but never used for computation.
#[derive(Debug, Clone, Default)]
pub struct TotalsTable {
    entries: Vec<Frequency>,
    index: HashMap<String, usize>,
}

impl TotalsTable {
    /// Create a table from (country, total) pairs.
    ///
    /// A country listed twice keeps its first position and its last value.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (country, total) in pairs {
            table.insert(country.into(), total);
        }
        table
    }

    /// Example totals for a handful of European countries.
    ///
    /// These are not real figures. They are only meant as a fallback when no
    /// totals file is available.
    pub fn example() -> Self {
        Self::from_pairs([
            ("Belgium", 2000.0),
            ("Denmark", 2500.0),
            ("England", 90000.0),
            ("France", 12000.0),
            ("Germany", 45000.0),
            ("Ireland", 55000.0),
            ("Netherlands", 6000.0),
            ("Norway", 6500.0),
            ("Scotland", 40000.0),
            ("Spain", 12000.0),
            ("Sweden", 8000.0),
        ])
    }

    /// Load totals from a file, choosing JSON for a `.json` extension and
    /// a comma-delimited table otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        log::debug!("Reading totals from {:?}", path);
        let file = std::fs::File::open(path)?;
        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    /// Parse a comma-delimited totals table.
    ///
    /// Expected format:
    /// - First row: two-column header (ignored)
    /// - Subsequent rows: `Country,Count`
    ///
    /// Rows with fewer than two cells are skipped. A table without at least
    /// one data row is rejected.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        if records.len() < 2 {
            return Err(FtmError::EmptyData(
                "Totals table needs a header and at least one data row".to_string(),
            ));
        }

        let mut table = Self::default();
        for (row_idx, record) in records.iter().enumerate().skip(1) {
            let (Some(country), Some(raw)) = (record.get(0), record.get(1)) else {
                log::debug!("Totals row {} has {} cells, skipping", row_idx, record.len());
                continue;
            };
            let country = country.trim();
            if country.is_empty() {
                continue;
            }
            let total: f64 = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FtmError::InvalidCount {
                    value: raw.to_string(),
                    row: row_idx,
                })?;
            table.insert(country.to_string(), total);
        }
        Ok(table)
    }

    /// Parse a JSON object of country names to totals.
    ///
    /// ```json
    /// {"Belarus": 1000, "Belgium": 2000, "Brazil": 100}
    /// ```
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let map: BTreeMap<String, f64> = serde_json::from_reader(reader)?;
        Ok(Self::from_pairs(
            map.into_iter().map(|(country, total)| (country.trim().to_string(), total)),
        ))
    }

    fn insert(&mut self, country: String, total: f64) {
        match self.index.get(&country) {
            Some(&idx) => self.entries[idx].value = total,
            None => {
                self.index.insert(country.clone(), self.entries.len());
                self.entries.push(Frequency::new(country, total));
            }
        }
    }

    /// Total recorded for a country, whatever its sign.
    pub fn get(&self, country: &str) -> Option<f64> {
        self.index.get(country).map(|&idx| self.entries[idx].value)
    }

    /// Total for a country if it is usable as a denominator (> 0).
    pub fn positive(&self, country: &str) -> Option<f64> {
        self.get(country).filter(|&total| total > 0.0)
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[Frequency] {
        &self.entries
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold England, Wales, Scotland and Northern Ireland into United Kingdom.
    ///
    /// See [`merge_uk`] for the exact rule. Like the counts, the table must
    /// be merged at most once.
    pub fn merge_uk(&mut self) {
        merge_uk(&mut self.entries);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.country.clone(), idx))
            .collect();
    }
}
