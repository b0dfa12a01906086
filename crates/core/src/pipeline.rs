//! Cause list parsing pipeline.
//!
//! Pages flow through three stages:
//! - line grouping, independent per page and run on the rayon pool
//! - the table state machine, strictly in document order since the session
//!   context and an open table carry across page boundaries
//! - the record merger, over the complete ordered row list

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::layout::{FillShading, Line, Page, ShadingProbe, group_lines};
use crate::merge::RecordMerger;
use crate::params::ParserParams;
use crate::record::{Column, MergedRecord, RawRow};
use crate::source::{PageSource, validate_pages};
use crate::table::{LineEvent, ParserState, StepContext, step};

/// A header label that could not be resolved, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingLabel {
    pub page: u32,
    pub column: Column,
}

/// Rows from the state machine pass plus its non-fatal findings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowPass {
    pub rows: Vec<RawRow>,
    pub dropped_tokens: usize,
    pub missing_labels: Vec<MissingLabel>,
    pub tables: usize,
    /// State after the last line, e.g. to see whether a table was left open.
    pub state: ParserState,
}

impl RowPass {
    fn record(&mut self, page: u32, event: LineEvent) {
        match event {
            LineEvent::TableStarted {
                resolution,
                trigger,
            } => {
                self.tables += 1;
                self.note_missing(page, &resolution.missing);
                if let Some(first) = trigger {
                    self.record(page, *first);
                }
            }
            LineEvent::HeaderRejected(resolution) => {
                self.note_missing(page, &resolution.missing);
            }
            LineEvent::Row { row, dropped } => {
                self.dropped_tokens += dropped;
                self.rows.push(row);
            }
            LineEvent::Blank { dropped } => self.dropped_tokens += dropped,
            _ => {}
        }
    }

    fn note_missing(&mut self, page: u32, missing: &[Column]) {
        self.missing_labels
            .extend(missing.iter().map(|&column| MissingLabel { page, column }));
    }
}

/// Result of a full parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub records: Vec<MergedRecord>,
    /// Raw rows before merging.
    pub rows: usize,
    /// Tokens on data lines that fell outside every column.
    pub dropped_tokens: usize,
    pub missing_labels: Vec<MissingLabel>,
    /// Continuation rows with no record to attach to.
    pub orphan_rows: usize,
    /// Table instances opened.
    pub tables: usize,
}

/// Cause list parser.
pub struct CauseListParser {
    params: ParserParams,
    probe: Box<dyn ShadingProbe>,
}

impl CauseListParser {
    /// Parser with fill-rectangle shading detection.
    pub fn new(params: ParserParams) -> Self {
        let probe = FillShading::from_params(&params);
        Self::with_probe(params, probe)
    }

    /// Parser with a caller-supplied shading probe.
    pub fn with_probe(params: ParserParams, probe: impl ShadingProbe + 'static) -> Self {
        Self {
            params,
            probe: Box::new(probe),
        }
    }

    pub fn params(&self) -> &ParserParams {
        &self.params
    }

    /// Run the state machine over all pages and collect raw rows.
    pub fn extract_rows(&self, pages: &[Page]) -> Result<RowPass> {
        validate_pages(pages)?;

        let precision = self.params.line_precision;
        let lines: Vec<Vec<Line>> = pages
            .par_iter()
            .map(|page| group_lines(&page.tokens, precision))
            .collect();

        let mut pass = RowPass::default();
        let mut state = ParserState::default();
        for (page, page_lines) in pages.iter().zip(&lines) {
            debug!(page = page.number, lines = page_lines.len(), "page");
            let cx = StepContext {
                page,
                probe: self.probe.as_ref(),
                params: &self.params,
            };
            for line in page_lines {
                let (next, event) = step(state, line, &cx);
                state = next;
                pass.record(page.number, event);
            }
        }
        pass.state = state;
        Ok(pass)
    }

    /// Parse pages into merged records.
    pub fn parse_pages(&self, pages: &[Page]) -> Result<ParseReport> {
        let pass = self.extract_rows(pages)?;
        let rows = pass.rows.len();
        let merged = RecordMerger::merge(pass.rows)?;

        let report = ParseReport {
            records: merged.records,
            rows,
            dropped_tokens: pass.dropped_tokens,
            missing_labels: pass.missing_labels,
            orphan_rows: merged.orphans,
            tables: pass.tables,
        };
        info!(
            pages = pages.len(),
            tables = report.tables,
            rows = report.rows,
            records = report.records.len(),
            dropped_tokens = report.dropped_tokens,
            orphan_rows = report.orphan_rows,
            "cause list parsed"
        );
        Ok(report)
    }

    /// Pull all pages from a source and parse them.
    pub fn parse(&self, source: &mut dyn PageSource) -> Result<ParseReport> {
        let pages = source.pages()?;
        self.parse_pages(&pages)
    }
}

impl Default for CauseListParser {
    fn default() -> Self {
        Self::new(ParserParams::default())
    }
}
