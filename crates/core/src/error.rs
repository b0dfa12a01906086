//! Error types for cause list reconstruction.

use thiserror::Error;

/// Primary error type for parsing, merging and persisting cause lists.
#[derive(Error, Debug)]
pub enum CauseListError {
    #[error(
        "metadata mismatch while merging record {serial}: {field} is {existing:?}, continuation has {incoming:?}"
    )]
    MergeConflict {
        serial: String,
        field: &'static str,
        existing: String,
        incoming: String,
    },

    #[error("malformed date {0:?}: expected DD-MM-YYYY or DD/MM/YYYY")]
    MalformedDate(String),

    #[error("no merged record carries a session date")]
    MissingDate,

    #[error("invalid page stream: {0}")]
    InvalidSource(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience Result type alias for CauseListError.
pub type Result<T> = std::result::Result<T, CauseListError>;
