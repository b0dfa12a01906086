//! Header recognition and column boundary inference.
//!
//! A header is recognized either by the gray fill under its first token or
//! by anchor words in its text. Header lines are buffered while they keep
//! coming (a label such as "ADVOCATE" may wrap onto its own line) and are
//! resolved into column boundaries once the first non-header line shows up.
//!
//! Resolution is a forward scan over the buffered tokens: for each label in
//! left-to-right order, tokens are concatenated from a start position until
//! the normalized concatenation equals the normalized label, stops being a
//! prefix of it, or runs into a token already claimed by an earlier label.
//! This tolerates arbitrary token segmentation ("Petitioner" "/"
//! "Respondent") without requiring span equality.

use tracing::{debug, warn};

use crate::layout::{Line, Page, ShadingProbe, Token};
use crate::params::ParserParams;
use crate::record::Column;

use super::text::normalize_for_match;

/// Horizontal range owned by one column of the current table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnBoundary {
    pub column: Column,
    pub x0: f64,
    pub x1: f64,
}

impl ColumnBoundary {
    pub fn label(&self) -> &'static str {
        self.column.label()
    }

    /// Inclusive containment, widened by `tolerance` on both sides.
    pub fn contains(&self, x: f64, tolerance: f64) -> bool {
        self.x0 - tolerance <= x && x <= self.x1 + tolerance
    }
}

/// Boundaries of the labels that were found, plus the labels that were not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderResolution {
    /// In label order.
    pub boundaries: Vec<ColumnBoundary>,
    pub missing: Vec<Column>,
}

/// Order in which buffered header tokens are scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOrder {
    /// All tokens sorted by `(x0, top)`.
    Columnar,
    /// Line by line, left to right within a line.
    Reading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanStep {
    Matched,
    Extend,
    Abandon,
}

fn scan_step(buffer: &str, target: &str) -> ScanStep {
    if buffer == target {
        ScanStep::Matched
    } else if target.starts_with(buffer) {
        ScanStep::Extend
    } else {
        ScanStep::Abandon
    }
}

struct HeaderToken<'a> {
    token: &'a Token,
    norm: String,
}

/// Does this line look like (part of) a table header?
pub fn is_header_line(
    line: &Line,
    page: &Page,
    probe: &dyn ShadingProbe,
    anchors: &[String],
) -> bool {
    let Some(first) = line.first() else {
        return false;
    };
    if probe.is_header_shaded(first, page) {
        return true;
    }
    if anchors.is_empty() {
        return false;
    }
    let text = normalize_for_match(&line.text());
    anchors
        .iter()
        .all(|a| text.contains(normalize_for_match(a).as_str()))
}

fn order_tokens(lines: &[Line], order: ScanOrder) -> Vec<HeaderToken<'_>> {
    let mut tokens: Vec<&Token> = lines.iter().flat_map(|l| l.tokens.iter()).collect();
    if order == ScanOrder::Columnar {
        tokens.sort_by(|a, b| a.x0.total_cmp(&b.x0).then(a.top.total_cmp(&b.top)));
    }
    tokens
        .into_iter()
        .map(|token| HeaderToken {
            token,
            norm: normalize_for_match(&token.text),
        })
        .collect()
}

/// Find `target` among unclaimed tokens; returns the leftmost `x0` of the
/// matched run and claims its tokens.
fn scan_label(tokens: &[HeaderToken<'_>], used: &mut [bool], target: &str) -> Option<f64> {
    for start in 0..tokens.len() {
        if used[start] {
            continue;
        }
        let mut buffer = String::new();
        for end in start..tokens.len() {
            if used[end] {
                break;
            }
            buffer.push_str(&tokens[end].norm);
            match scan_step(&buffer, target) {
                ScanStep::Matched => {
                    let x0 = tokens[start..=end]
                        .iter()
                        .map(|t| t.token.x0)
                        .fold(f64::INFINITY, f64::min);
                    used[start..=end].iter_mut().for_each(|u| *u = true);
                    return Some(x0);
                }
                ScanStep::Extend => {}
                ScanStep::Abandon => break,
            }
        }
    }
    None
}

/// Left edges of each label under one scan order.
fn scan_labels(lines: &[Line], order: ScanOrder) -> (Vec<(Column, f64)>, Vec<Column>) {
    let tokens = order_tokens(lines, order);
    let mut used = vec![false; tokens.len()];
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for column in Column::ALL {
        match scan_label(&tokens, &mut used, &normalize_for_match(column.label())) {
            Some(x0) => found.push((column, x0)),
            None => missing.push(column),
        }
    }
    (found, missing)
}

/// Resolve buffered header lines into column boundaries.
///
/// Tokens are scanned in columnar order first. If that leaves labels
/// unresolved, the scan is repeated in reading order and the result with
/// fewer missing labels is kept (columnar on a tie). Right edges are the next
/// resolved column's left edge minus `column_gap`; the last column ends at
/// `page_width - right_margin`. Missing labels get no boundary and so
/// receive no tokens.
pub fn resolve_header(lines: &[Line], page_width: f64, params: &ParserParams) -> HeaderResolution {
    let (mut found, mut missing) = scan_labels(lines, ScanOrder::Columnar);
    if !missing.is_empty() {
        let (alt_found, alt_missing) = scan_labels(lines, ScanOrder::Reading);
        if alt_missing.len() < missing.len() {
            debug!(
                columnar = missing.len(),
                reading = alt_missing.len(),
                "header resolved in reading order"
            );
            found = alt_found;
            missing = alt_missing;
        }
    }

    for column in &missing {
        warn!(label = column.label(), "missing header label");
    }

    let right_edge = page_width - params.right_margin;
    let boundaries: Vec<ColumnBoundary> = found
        .iter()
        .enumerate()
        .map(|(i, &(column, x0))| {
            let x1 = found
                .get(i + 1)
                .map_or(right_edge, |&(_, next_x0)| next_x0 - params.column_gap);
            ColumnBoundary { column, x0, x1 }
        })
        .collect();

    for b in &boundaries {
        if b.x1 < b.x0 {
            warn!(label = b.label(), x0 = b.x0, x1 = b.x1, "empty column range");
        }
    }
    debug!(?boundaries, "header resolved");

    HeaderResolution {
        boundaries,
        missing,
    }
}
