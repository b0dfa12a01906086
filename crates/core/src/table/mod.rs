//! Table reconstruction.
//!
//! This module provides header recognition and column boundary inference,
//! token-to-column assignment and the per-line state machine that ties them
//! to the session metadata.

pub mod columns;
pub mod header;
pub mod state;
pub mod text;

pub use columns::{Assignment, assign_line};
pub use header::{ColumnBoundary, HeaderResolution, ScanOrder, is_header_line, resolve_header};
pub use state::{LineEvent, ParserState, StepContext, TableMode, step};
