//! Delimited text output.
//!
//! All outputs are comma-delimited with a fixed header and CRLF line
//! endings. Real values are written with six decimals.

use super::sorted_descending;
use crate::data::{Frequency, StatRow, TotalsTable};
use crate::error::Result;
use crate::tally::CountryTally;
use csv::{Terminator, Writer, WriterBuilder};
use std::io::Write;
use std::path::Path;

/// Header of a frequency report.
pub const FREQUENCY_HEADER: [&str; 2] = ["Location", "Value"];

/// Header of a tally export. Such a file can be read back as totals.
pub const TALLY_HEADER: [&str; 2] = ["Country", "Testers"];

/// Header of the statistics report.
pub const STATS_HEADER: [&str; 8] = [
    "Country",
    "Sample_size",
    "Positives",
    "Fraction",
    "Margin_of_error",
    "Quality",
    "Min_sample_size",
    "Acceptable_sample_size",
];

fn writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out)
}

fn real(value: f64) -> String {
    format!("{:.6}", value)
}

/// Write (Location, Value) rows in the given order.
pub fn write_frequencies<W: Write>(out: W, frequencies: &[Frequency]) -> Result<()> {
    let mut wtr = writer(out);
    wtr.write_record(FREQUENCY_HEADER)?;
    for freq in frequencies {
        wtr.write_record([freq.country.as_str(), real(freq.value).as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write (Country, Testers) rows in the given order.
///
/// Whole numbers are written without decimals, so the output reads back as
/// a totals table.
pub fn write_tally<W: Write>(out: W, counts: &[Frequency]) -> Result<()> {
    let mut wtr = writer(out);
    wtr.write_record(TALLY_HEADER)?;
    for freq in counts {
        wtr.write_record([freq.country.as_str(), freq.value.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write statistics rows in the given order.
///
/// Sample sizes that cannot be computed are written as `NA`; an infinite
/// quality is written as `inf`.
pub fn write_stats<W: Write>(out: W, rows: &[StatRow]) -> Result<()> {
    let mut wtr = writer(out);
    wtr.write_record(STATS_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.country.clone(),
            real(row.sample_size),
            row.positives.to_string(),
            real(row.fraction),
            real(row.margin_of_error),
            real(row.quality),
            row.min_sample_size.to_string(),
            row.acceptable_sample_size.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a frequency report to a file.
pub fn frequencies_to_csv<P: AsRef<Path>>(path: P, frequencies: &[Frequency]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_frequencies(file, frequencies)
}

/// Write a tally to a file, largest count first.
pub fn tally_to_csv<P: AsRef<Path>>(path: P, tally: &CountryTally) -> Result<()> {
    let counts = sorted_descending(tally.to_frequencies());
    let file = std::fs::File::create(path)?;
    write_tally(file, &counts)
}

/// Write a totals table to a file in load order.
pub fn totals_to_csv<P: AsRef<Path>>(path: P, totals: &TotalsTable) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_tally(file, totals.entries())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frequencies() {
        let mut buf = Vec::new();
        write_frequencies(
            &mut buf,
            &[Frequency::new("France", 0.016667), Frequency::new("Bosnia, Herzegovina", 2.0)],
        )
        .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Location,Value\r\nFrance,0.016667\r\n\"Bosnia, Herzegovina\",2.000000\r\n"
        );
    }

    #[test]
    fn test_write_tally() {
        let mut buf = Vec::new();
        write_tally(&mut buf, &[Frequency::new("Norway", 3.0), Frequency::new("Spain", 2.5)])
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Country,Testers\r\nNorway,3\r\nSpain,2.5\r\n"
        );
    }

    #[test]
    fn test_tally_reads_back_as_totals() {
        let tally = CountryTally::from_labels(["Spain", "Norway", "Norway"]);
        let file = tempfile::NamedTempFile::new().unwrap();
        tally_to_csv(file.path(), &tally).unwrap();

        let totals = TotalsTable::from_path(file.path()).unwrap();
        assert_eq!(totals.entries()[0], Frequency::new("Norway", 2.0));
        assert_eq!(totals.get("Spain"), Some(1.0));
    }

    #[test]
    fn test_write_stats() {
        let rows = vec![
            StatRow::new("Ireland", 100.0, 10).unwrap(),
            StatRow::new("Iceland", 20.0, 20).unwrap(),
        ];
        let mut buf = Vec::new();
        write_stats(&mut buf, &rows).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(
            lines[0],
            "Country,Sample_size,Positives,Fraction,Margin_of_error,Quality,Min_sample_size,Acceptable_sample_size"
        );
        assert_eq!(lines[1], "Ireland,100.000000,10,0.100000,0.058800,1.700680,101,41");
        assert_eq!(lines[2], "Iceland,20.000000,20,1.000000,0.000000,inf,NA,NA");
        assert_eq!(lines[3], "");
    }
}
