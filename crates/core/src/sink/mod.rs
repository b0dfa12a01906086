//! Record sinks.
//!
//! Merged records leave the crate through a `RecordSink`: a date-partitioned
//! SQLite store or a flat CSV export.

mod export;
mod sqlite;

pub use export::{CsvExporter, EXPORT_HEADERS};
pub use sqlite::{SqliteRepository, TableNames};

use crate::error::{CauseListError, Result};
use crate::record::MergedRecord;

/// Destination for merged records of one sitting date.
pub trait RecordSink {
    fn write(&mut self, date: &str, records: &[MergedRecord]) -> Result<()>;
}

/// `DD-MM-YYYY` or `DD/MM/YYYY` to `YYYYMMDD`.
pub fn date_suffix(date: &str) -> Result<String> {
    let parts: Vec<&str> = date.trim().split(['-', '/']).collect();
    let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    match parts.as_slice() {
        [dd, mm, yyyy] if parts.iter().all(numeric) => Ok(format!("{yyyy}{mm}{dd}")),
        _ => Err(CauseListError::MalformedDate(date.to_string())),
    }
}

/// Date of the first record that carries one.
pub fn session_date(records: &[MergedRecord]) -> Result<&str> {
    records
        .iter()
        .filter_map(|r| r.meta.date.as_deref())
        .find(|d| !d.is_empty())
        .ok_or(CauseListError::MissingDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_from_both_separators() {
        assert_eq!(date_suffix("30-12-2025").unwrap(), "20251230");
        assert_eq!(date_suffix("01/02/2026").unwrap(), "20260201");
    }

    #[test]
    fn malformed_dates_are_fatal() {
        for bad in ["30-12", "30-12-2025-1", "3O-12-2025", "", "30--2025", "30.12.2025"] {
            assert!(
                matches!(date_suffix(bad), Err(CauseListError::MalformedDate(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn session_date_skips_undated_records() {
        use crate::record::{Cells, Snapshot};
        let undated = MergedRecord {
            cells: Cells::default(),
            meta: Snapshot::default(),
            pages: vec![1],
        };
        let mut dated = undated.clone();
        dated.meta.date = Some("30-12-2025".to_string());

        assert_eq!(session_date(&[undated.clone(), dated]).unwrap(), "30-12-2025");
        assert!(matches!(
            session_date(&[undated]),
            Err(CauseListError::MissingDate)
        ));
    }
}
