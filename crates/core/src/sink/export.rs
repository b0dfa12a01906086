//! Flat CSV export.

use std::io::Write;

use crate::error::Result;
use crate::record::{Column, MergedRecord};

use super::RecordSink;

/// Header row: the four table labels, then the carried metadata.
pub const EXPORT_HEADERS: [&str; 9] = [
    "SNO.",
    "CASE NO.",
    "Petitioner / Respondent",
    "Petitioner / Respondent ADVOCATE",
    "Judges",
    "Court No",
    "Court",
    "Date",
    "Page No",
];

/// CSV writer for merged records. The header row is written once, before
/// the first batch.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            header_written: false,
        }
    }

    /// Write one row per record, preceded by the header on the first call.
    pub fn export(&mut self, records: &[MergedRecord]) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(EXPORT_HEADERS)?;
            self.header_written = true;
        }
        for record in records {
            let mut row: Vec<&str> = Column::ALL.iter().map(|&c| record.cells.get(c)).collect();
            let pages = record.page_list();
            row.extend([
                record.meta.justices.as_str(),
                record.meta.court_no.as_deref().unwrap_or(""),
                record.meta.court.as_deref().unwrap_or(""),
                record.meta.date.as_deref().unwrap_or(""),
                pages.as_str(),
            ]);
            self.writer.write_record(&row)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> RecordSink for CsvExporter<W> {
    fn write(&mut self, _date: &str, records: &[MergedRecord]) -> Result<()> {
        self.export(records)
    }
}
