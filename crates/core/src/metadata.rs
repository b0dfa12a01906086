//! Session metadata tracking.
//!
//! Lines printed above a table announce the sitting: the list date, the
//! court number and the bench. The tracker pulls those out with regular
//! expressions and keeps them in a `SessionContext` that every row read
//! until the end of the table is stamped with.

use std::sync::LazyLock;

use regex::Regex;

use crate::layout::Line;
use crate::record::Snapshot;
use crate::table::text::collapse_whitespace;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:DAILY\s+CAUSE\s+LIST\s+FOR\s+)?DATED\s*[:\-]?\s*(\d{2}[-/]\d{2}[-/]\d{4})")
        .expect("valid date regex")
});

static COURT_NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)COURT\s*NO\.?\s*[:\-]?\s*(\d+)").expect("valid court number regex")
});

const JUSTICE_PREFIX: &str = "HON";

/// Metadata carried from the page preamble onto table rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub date: Option<String>,
    pub court: Option<String>,
    pub court_no: Option<String>,
    pub justices: Vec<String>,
    /// Case category banner inside the table, e.g. `FRESH CASES`.
    pub category: Option<String>,
}

impl SessionContext {
    /// Copy of the fields stamped onto a row.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            justices: self.justices.join(" | "),
            court_no: self.court_no.clone(),
            court: self.court.clone(),
            date: self.date.clone(),
            category: self.category.clone(),
        }
    }

    /// Reset at a table-end marker; only the court survives, taken from the
    /// marker.
    pub fn close_table(&mut self, court: &str) {
        *self = SessionContext {
            court: Some(court.to_string()),
            ..SessionContext::default()
        };
    }
}

/// Which fields a line updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub date: bool,
    pub court_no: bool,
    pub justice: bool,
}

impl MetadataUpdate {
    pub fn any(&self) -> bool {
        self.date || self.court_no || self.justice
    }
}

/// Extract the sitting date from a line of text.
pub fn match_date(text: &str) -> Option<&str> {
    DATE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Extract the court number from a line of text.
pub fn match_court_no(text: &str) -> Option<&str> {
    COURT_NO_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Run the three extractions against one line outside a table.
///
/// The date and court number replace the current values; a justice line
/// appends to the bench. Lines matching nothing leave the context as is.
pub fn observe_line(ctx: &mut SessionContext, line: &Line) -> MetadataUpdate {
    let text = line.text();
    let mut update = MetadataUpdate::default();

    if line
        .first()
        .is_some_and(|t| t.text.to_uppercase().starts_with(JUSTICE_PREFIX))
    {
        ctx.justices.push(collapse_whitespace(&text));
        update.justice = true;
    }

    if let Some(date) = match_date(&text) {
        ctx.date = Some(date.to_string());
        update.date = true;
    }

    if let Some(court_no) = match_court_no(&text) {
        ctx.court_no = Some(court_no.to_string());
        update.court_no = true;
    }

    update
}
