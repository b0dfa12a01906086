//! Date-partitioned SQLite storage.
//!
//! Each sitting date gets its own fact table `cause_list_<YYYYMMDD>` and
//! junction table `cause_list_judges_<YYYYMMDD>`; judge names live in one
//! global `judges` table. Re-running a date clears its rows first, in the
//! same transaction as the new inserts.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::error::Result;
use crate::record::MergedRecord;

use super::{RecordSink, date_suffix};

/// Table names for one sitting date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableNames {
    pub causes: String,
    pub judges_map: String,
}

impl TableNames {
    /// Fails on a malformed date before any name is built.
    pub fn for_date(date: &str) -> Result<Self> {
        let suffix = date_suffix(date)?;
        Ok(Self {
            causes: format!("cause_list_{suffix}"),
            judges_map: format!("cause_list_judges_{suffix}"),
        })
    }
}

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the date's tables if needed and clear any rows from a
    /// previous run.
    pub fn prepare_tables(&mut self, date: &str) -> Result<TableNames> {
        let names = TableNames::for_date(date)?;
        let tx = self.conn.transaction()?;
        create_and_clear(&tx, &names)?;
        tx.commit()?;
        Ok(names)
    }

    /// Insert records and link each to its judges. Returns the number of
    /// records written.
    pub fn insert(&mut self, date: &str, records: &[MergedRecord]) -> Result<usize> {
        let names = TableNames::for_date(date)?;
        let tx = self.conn.transaction()?;
        insert_records(&tx, &names, records)?;
        tx.commit()?;
        Ok(records.len())
    }

    /// Replace the date's records in a single transaction. On error the
    /// rows of the previous run are left in place.
    pub fn replace(&mut self, date: &str, records: &[MergedRecord]) -> Result<usize> {
        let names = TableNames::for_date(date)?;
        let tx = self.conn.transaction()?;
        create_and_clear(&tx, &names)?;
        insert_records(&tx, &names, records)?;
        tx.commit()?;
        Ok(records.len())
    }
}

fn create_and_clear(conn: &Connection, names: &TableNames) -> Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {causes} (
            cause_id INTEGER PRIMARY KEY AUTOINCREMENT,
            sno TEXT,
            case_no TEXT,
            petitioner_respondent TEXT,
            advocate TEXT,
            court_no TEXT,
            page_no TEXT
        );
        CREATE TABLE IF NOT EXISTS judges (
            judge_id INTEGER PRIMARY KEY AUTOINCREMENT,
            judge_name TEXT UNIQUE
        );
        CREATE TABLE IF NOT EXISTS {map} (
            cause_id INTEGER,
            judge_id INTEGER,
            PRIMARY KEY (cause_id, judge_id)
        );
        DELETE FROM {map};
        DELETE FROM {causes};",
        causes = names.causes,
        map = names.judges_map,
    ))?;
    debug!(table = %names.causes, "tables prepared");
    Ok(())
}

fn insert_records(conn: &Connection, names: &TableNames, records: &[MergedRecord]) -> Result<()> {
    let mut insert_cause = conn.prepare(&format!(
        "INSERT INTO {} (sno, case_no, petitioner_respondent, advocate, court_no, page_no)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        names.causes
    ))?;
    let mut insert_judge = conn.prepare("INSERT OR IGNORE INTO judges (judge_name) VALUES (?1)")?;
    let mut select_judge = conn.prepare("SELECT judge_id FROM judges WHERE judge_name = ?1")?;
    let mut link = conn.prepare(&format!(
        "INSERT OR IGNORE INTO {} (cause_id, judge_id) VALUES (?1, ?2)",
        names.judges_map
    ))?;

    for record in records {
        insert_cause.execute(params![
            record.cells.sno,
            record.cells.case_no,
            record.cells.parties,
            record.cells.advocate,
            record.meta.court_no,
            record.page_list(),
        ])?;
        let cause_id = conn.last_insert_rowid();

        for judge in record.judges() {
            insert_judge.execute(params![judge])?;
            let judge_id: i64 = select_judge.query_row(params![judge], |row| row.get(0))?;
            link.execute(params![cause_id, judge_id])?;
        }
    }
    info!(table = %names.causes, records = records.len(), "records stored");
    Ok(())
}

impl RecordSink for SqliteRepository {
    fn write(&mut self, date: &str, records: &[MergedRecord]) -> Result<()> {
        self.replace(date, records)?;
        Ok(())
    }
}
