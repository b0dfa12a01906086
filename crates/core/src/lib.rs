//! causelist - table reconstruction for court cause lists.
//!
//! A cause list PDF carries no table grid, only positioned text tokens and
//! shaded rectangles. This crate recovers the column structure from the
//! header cells, assigns tokens to columns, tracks the sitting metadata
//! (date, court number, bench) and folds continuation lines into one
//! record per listed case.

pub mod error;
pub mod layout;
pub mod merge;
pub mod metadata;
pub mod params;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod source;
pub mod table;

pub use error::{CauseListError, Result};
pub use merge::RecordMerger;
pub use params::{AssignAnchor, ParserParams};
pub use pipeline::{CauseListParser, ParseReport};
pub use record::{MergedRecord, RawRow};
