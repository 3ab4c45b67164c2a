//! Project roster: one country label per tested participant.

use crate::error::Result;
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// The country labels of a Family Tree DNA project.
///
/// Labels are trimmed on load. Rows that are too short to contain the
/// country column, and rows whose country cell is blank, are dropped.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    labels: Vec<String>,
    /// Number of input rows dropped because they were short or blank.
    dropped: usize,
}

/// Options for reading a project table.
#[derive(Debug, Clone, Copy)]
pub struct RosterOptions {
    /// 0-based index of the column holding the country name.
    pub country_column: usize,
    /// Whether the first row is a header to be skipped.
    pub has_header: bool,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            country_column: 2,
            has_header: true,
        }
    }
}

impl Roster {
    /// Build a roster from already-parsed labels.
    ///
    /// Labels are trimmed and empty ones are discarded.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::default();
        for label in labels {
            roster.push(label.as_ref());
        }
        roster
    }

    /// Load a roster from a comma-delimited project table.
    pub fn from_csv<P: AsRef<Path>>(path: P, options: RosterOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading project table {:?}", path);
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, options)
    }

    /// Load a roster from any reader producing comma-delimited rows.
    ///
    /// Only the country cell is decoded, so other columns may hold any
    /// encoding. Invalid UTF-8 in the country cell is replaced lossily.
    pub fn from_reader<R: Read>(reader: R, options: RosterOptions) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut roster = Self::default();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record?;
            match record.get(options.country_column) {
                Some(cell) => roster.push(&String::from_utf8_lossy(cell)),
                None => {
                    log::debug!(
                        "Row {} has {} columns, dropping",
                        row_idx + 1,
                        record.len()
                    );
                    roster.dropped += 1;
                }
            }
        }
        Ok(roster)
    }

    fn push(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            self.dropped += 1;
        } else {
            self.labels.push(label.to_string());
        }
    }

    /// Country labels in input order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of participants with a country.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of rows dropped while loading.
    pub fn n_dropped(&self) -> usize {
        self.dropped
    }
}
