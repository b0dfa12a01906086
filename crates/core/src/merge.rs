//! Record merging.
//!
//! A listed case often spans several physical lines: the serial number may
//! be split (`1719` then `.1`), party and advocate text wraps, and a record
//! may continue onto the next page. The merger walks the rows in document
//! order with a single open record and folds every continuation into it.

use tracing::warn;

use crate::error::{CauseListError, Result};
use crate::record::{Column, MergedRecord, RawRow};

/// Marker that starts a serial-number suffix row.
pub const CONTINUATION_MARKER: char = '.';

const FREE_TEXT: [Column; 3] = [Column::CaseNo, Column::Parties, Column::Advocate];

/// Output of a merge pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutput {
    pub records: Vec<MergedRecord>,
    /// Continuation rows seen before any record was open.
    pub orphans: usize,
}

/// Streaming merger; feed rows in document order, then `finish`.
#[derive(Debug, Default)]
pub struct RecordMerger {
    current: Option<MergedRecord>,
    output: MergeOutput,
}

impl RecordMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a whole row sequence.
    pub fn merge(rows: impl IntoIterator<Item = RawRow>) -> Result<MergeOutput> {
        let mut merger = Self::new();
        for row in rows {
            merger.push(row)?;
        }
        Ok(merger.finish())
    }

    /// Fold one row into the open record or start a new one.
    ///
    /// Fails when a continuation row disagrees with the open record on a
    /// metadata field.
    pub fn push(&mut self, row: RawRow) -> Result<()> {
        let serial = row.cells.sno.trim().to_string();

        if !serial.is_empty() && !serial.starts_with(CONTINUATION_MARKER) {
            self.flush();
            self.current = Some(MergedRecord::from(row));
            return Ok(());
        }

        let Some(current) = self.current.as_mut() else {
            warn!(page = row.page, serial = %serial, "continuation row without an open record");
            self.output.orphans += 1;
            return Ok(());
        };

        if !serial.is_empty() {
            current.cells.sno.push_str(&serial);
            return Ok(());
        }

        for column in FREE_TEXT {
            let incoming = row.cells.get(column);
            if incoming.is_empty() {
                continue;
            }
            let text = current.cells.get_mut(column);
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(incoming);
        }

        let serial = current.cells.sno.clone();
        let justices = &mut current.meta.justices;
        reconcile_text(&serial, "justices", justices, &row.meta.justices)?;
        reconcile(&serial, "court_no", &mut current.meta.court_no, &row.meta.court_no)?;
        reconcile(&serial, "court", &mut current.meta.court, &row.meta.court)?;
        reconcile(&serial, "date", &mut current.meta.date, &row.meta.date)?;

        if !current.pages.contains(&row.page) {
            current.pages.push(row.page);
        }
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            self.output.records.push(record);
        }
    }

    /// Close the open record and return everything merged so far.
    pub fn finish(mut self) -> MergeOutput {
        self.flush();
        self.output
    }
}

fn conflict(serial: &str, field: &'static str, existing: &str, incoming: &str) -> CauseListError {
    CauseListError::MergeConflict {
        serial: serial.to_string(),
        field,
        existing: existing.to_string(),
        incoming: incoming.to_string(),
    }
}

/// Adopt `incoming` when the record has no value yet, otherwise require
/// equality. An empty incoming value never conflicts.
fn reconcile_text(
    serial: &str,
    field: &'static str,
    current: &mut String,
    incoming: &str,
) -> Result<()> {
    if incoming.is_empty() {
        return Ok(());
    }
    if current.is_empty() {
        *current = incoming.to_string();
        return Ok(());
    }
    if current.as_str() != incoming {
        return Err(conflict(serial, field, current, incoming));
    }
    Ok(())
}

fn reconcile(
    serial: &str,
    field: &'static str,
    current: &mut Option<String>,
    incoming: &Option<String>,
) -> Result<()> {
    let Some(incoming) = incoming.as_deref().filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    match current {
        Some(existing) if !existing.is_empty() => {
            if existing.as_str() == incoming {
                Ok(())
            } else {
                Err(conflict(serial, field, existing, incoming))
            }
        }
        _ => {
            *current = Some(incoming.to_string());
            Ok(())
        }
    }
}
