//! Row and record types.
//!
//! A `RawRow` is one physical data line split into the four cause list
//! columns plus the session metadata in effect when it was read. A
//! `MergedRecord` is one listed case after its continuation lines have been
//! folded in.

use itertools::Itertools;
use serde::Serialize;

/// The four columns of a cause list table, in left-to-right order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    Sno,
    CaseNo,
    Parties,
    Advocate,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Sno,
        Column::CaseNo,
        Column::Parties,
        Column::Advocate,
    ];

    /// Header text printed above the column.
    pub fn label(self) -> &'static str {
        match self {
            Column::Sno => "SNO.",
            Column::CaseNo => "CASE NO.",
            Column::Parties => "Petitioner / Respondent",
            Column::Advocate => "Petitioner / Respondent ADVOCATE",
        }
    }
}

/// Per-column text of one line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cells {
    pub sno: String,
    pub case_no: String,
    pub parties: String,
    pub advocate: String,
}

impl Cells {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::Sno => &self.sno,
            Column::CaseNo => &self.case_no,
            Column::Parties => &self.parties,
            Column::Advocate => &self.advocate,
        }
    }

    pub fn get_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Sno => &mut self.sno,
            Column::CaseNo => &mut self.case_no,
            Column::Parties => &mut self.parties,
            Column::Advocate => &mut self.advocate,
        }
    }

    pub fn is_blank(&self) -> bool {
        Column::ALL.iter().all(|&c| self.get(c).is_empty())
    }
}

/// Session metadata captured with each row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Justice names joined with `" | "`; empty when no bench is known.
    pub justices: String,
    pub court_no: Option<String>,
    pub court: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
}

/// One data line of a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RawRow {
    #[serde(flatten)]
    pub cells: Cells,
    #[serde(flatten)]
    pub meta: Snapshot,
    pub page: u32,
}

/// One logical case entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedRecord {
    #[serde(flatten)]
    pub cells: Cells,
    #[serde(flatten)]
    pub meta: Snapshot,
    /// Distinct pages the record was read from, in first-seen order.
    pub pages: Vec<u32>,
}

impl From<RawRow> for MergedRecord {
    fn from(row: RawRow) -> Self {
        Self {
            cells: row.cells,
            meta: row.meta,
            pages: vec![row.page],
        }
    }
}

impl MergedRecord {
    /// Pages joined as `"3, 4"`.
    pub fn page_list(&self) -> String {
        self.pages.iter().join(", ")
    }

    /// Individual justice names.
    pub fn judges(&self) -> impl Iterator<Item = &str> {
        self.meta
            .justices
            .split('|')
            .map(str::trim)
            .filter(|j| !j.is_empty())
    }
}
