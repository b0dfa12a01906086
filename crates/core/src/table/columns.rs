//! Geometric assignment of a data line's tokens to columns.

use crate::layout::{Line, Token};
use crate::params::AssignAnchor;
use crate::record::Cells;

use super::header::ColumnBoundary;
use super::text::collapse_whitespace;

/// Cell text of one line plus the number of tokens no column claimed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    pub cells: Cells,
    pub dropped: usize,
}

fn anchor_x(token: &Token, anchor: AssignAnchor) -> f64 {
    match anchor {
        AssignAnchor::Start => token.x0,
        AssignAnchor::Midpoint => token.mid_x(),
    }
}

/// Place each token in the first boundary whose range (widened by
/// `tolerance`) contains its anchor coordinate, then join each column's
/// tokens left to right with single spaces.
///
/// Pure: the same line and boundaries always yield the same assignment.
pub fn assign_line(
    line: &Line,
    boundaries: &[ColumnBoundary],
    anchor: AssignAnchor,
    tolerance: f64,
) -> Assignment {
    let mut parts: [Vec<&str>; 4] = Default::default();
    let mut dropped = 0;

    for token in &line.tokens {
        let x = anchor_x(token, anchor);
        match boundaries.iter().find(|b| b.contains(x, tolerance)) {
            Some(b) => parts[b.column as usize].push(token.text.as_str()),
            None => dropped += 1,
        }
    }

    let mut cells = Cells::default();
    for boundary in boundaries {
        *cells.get_mut(boundary.column) =
            collapse_whitespace(&parts[boundary.column as usize].join(" "));
    }
    Assignment { cells, dropped }
}
