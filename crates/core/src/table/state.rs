//! Table state machine.
//!
//! Consumes one physical line at a time in document order and decides
//! whether it is preamble metadata, part of a header, a repeated page
//! banner, a table-end marker or a data line. All parser state lives in
//! `ParserState`, which `step` takes by value and hands back, so the machine
//! can be driven line by line without any document source.

use tracing::{debug, warn};

use crate::layout::{Line, Page, ShadingProbe};
use crate::metadata::{SessionContext, match_court_no, match_date, observe_line};
use crate::params::ParserParams;
use crate::record::RawRow;

use super::columns::assign_line;
use super::header::{ColumnBoundary, HeaderResolution, is_header_line, resolve_header};

/// Where the parser is relative to a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableMode {
    #[default]
    Outside,
    CollectingHeader,
    InTable,
}

/// Parser state carried from line to line and across page boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParserState {
    pub mode: TableMode,
    /// Header lines buffered while collecting.
    pub header_lines: Vec<Line>,
    /// Boundaries of the open table; empty outside a table.
    pub boundaries: Vec<ColumnBoundary>,
    pub session: SessionContext,
}

/// What a line turned out to be.
#[derive(Clone, Debug, PartialEq)]
pub enum LineEvent {
    /// Outside a table, no header; metadata may have been updated.
    Preamble,
    /// Buffered as part of a header.
    HeaderLine,
    /// Header resolved. `trigger` is what the resolving line yielded as the
    /// table's first line, `None` when it is skipped.
    TableStarted {
        resolution: HeaderResolution,
        trigger: Option<Box<LineEvent>>,
    },
    /// Header collected but no label resolved; back outside.
    HeaderRejected(HeaderResolution),
    /// Table-end marker; session reset.
    TableEnded,
    /// Repeated page banner inside a table.
    Banner,
    /// Case category banner inside a table.
    Category(String),
    /// A data line with at least one non-empty cell.
    Row { row: RawRow, dropped: usize },
    /// A data line whose tokens all fell outside the columns, or were blank.
    Blank { dropped: usize },
}

/// Read-only inputs for one step.
pub struct StepContext<'a> {
    pub page: &'a Page,
    pub probe: &'a dyn ShadingProbe,
    pub params: &'a ParserParams,
}

fn is_table_end(line: &Line, upper: &str, state: &ParserState, params: &ParserParams) -> bool {
    let (Some(first), Some(first_col)) = (line.first(), state.boundaries.first()) else {
        return false;
    };
    upper.contains(&params.table_end_marker.to_uppercase())
        && (first.x0 - first_col.x0).abs() <= params.table_end_x_tolerance
}

/// A restated date or court number banner. The pattern alone is not enough:
/// the line must also carry the value, so party text such as
/// "HIGH COURT NORTH" stays data.
fn is_banner(text: &str, upper: &str, params: &ParserParams) -> bool {
    params
        .banner_patterns
        .iter()
        .any(|p| upper.contains(&p.to_uppercase()))
        && (match_date(text).is_some() || match_court_no(text).is_some())
}

/// A whole-line bracketed banner such as `[FRESH CASES]`.
fn category_banner(text: &str) -> Option<String> {
    let text = text.trim();
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    if inner.to_uppercase().contains("CASES") || inner.contains('-') {
        Some(inner.trim().to_string())
    } else {
        None
    }
}

/// Advance the machine by one line.
pub fn step(
    mut state: ParserState,
    line: &Line,
    cx: &StepContext<'_>,
) -> (ParserState, LineEvent) {
    let params = cx.params;
    let text = line.text();
    let upper = text.to_uppercase();

    if state.mode == TableMode::InTable {
        if is_table_end(line, &upper, &state, params) {
            debug!(page = cx.page.number, top = line.top, "table end");
            state.mode = TableMode::Outside;
            state.boundaries.clear();
            state.session.close_table(&params.table_end_marker);
            return (state, LineEvent::TableEnded);
        }
    } else {
        observe_line(&mut state.session, line);
    }

    if is_header_line(line, cx.page, cx.probe, &params.header_anchors) {
        if state.mode == TableMode::InTable {
            debug!(page = cx.page.number, "new header inside table");
            state.boundaries.clear();
        }
        state.mode = TableMode::CollectingHeader;
        state.header_lines.push(line.clone());
        return (state, LineEvent::HeaderLine);
    }

    match state.mode {
        TableMode::Outside => (state, LineEvent::Preamble),
        TableMode::CollectingHeader => {
            let lines = std::mem::take(&mut state.header_lines);
            let resolution = resolve_header(&lines, cx.page.width, params);
            if resolution.boundaries.is_empty() {
                warn!(page = cx.page.number, "header matched no labels");
                state.mode = TableMode::Outside;
                return (state, LineEvent::HeaderRejected(resolution));
            }
            debug!(
                page = cx.page.number,
                columns = resolution.boundaries.len(),
                "table start"
            );
            state.boundaries = resolution.boundaries.clone();
            state.mode = TableMode::InTable;
            if params.skip_trigger_line {
                return (
                    state,
                    LineEvent::TableStarted {
                        resolution,
                        trigger: None,
                    },
                );
            }
            let (state, first) = table_line(state, line, &text, &upper, cx);
            (
                state,
                LineEvent::TableStarted {
                    resolution,
                    trigger: Some(Box::new(first)),
                },
            )
        }
        TableMode::InTable => table_line(state, line, &text, &upper, cx),
    }
}

/// A line inside an open table: banner, category or data.
fn table_line(
    mut state: ParserState,
    line: &Line,
    text: &str,
    upper: &str,
    cx: &StepContext<'_>,
) -> (ParserState, LineEvent) {
    let params = cx.params;
    if is_banner(text, upper, params) {
        return (state, LineEvent::Banner);
    }
    if let Some(category) = category_banner(text) {
        state.session.category = Some(category.clone());
        return (state, LineEvent::Category(category));
    }

    let assignment = assign_line(
        line,
        &state.boundaries,
        params.assign_anchor,
        params.assign_tolerance,
    );
    if assignment.dropped > 0 {
        warn!(
            page = cx.page.number,
            top = line.top,
            dropped = assignment.dropped,
            "tokens outside all columns"
        );
    }
    if assignment.cells.is_blank() {
        return (
            state,
            LineEvent::Blank {
                dropped: assignment.dropped,
            },
        );
    }
    let row = RawRow {
        cells: assignment.cells,
        meta: state.session.snapshot(),
        page: cx.page.number,
    };
    (
        state,
        LineEvent::Row {
            row,
            dropped: assignment.dropped,
        },
    )
}
