//! Grouping of page tokens into physical lines.
//!
//! Tokens are bucketed by their `top` rounded to a fixed number of decimal
//! places, so fragments of one printed line that differ by sub-point jitter
//! land together. Lines come out top to bottom, tokens left to right.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use super::types::{Line, Token};

pub(crate) type KeyF64 = OrderedFloat<f64>;

pub(crate) fn key_f64(v: f64) -> KeyF64 {
    OrderedFloat(v)
}

/// Round `v` to `precision` decimal places.
pub fn round_to(v: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (v * scale).round() / scale
}

/// Group tokens into lines keyed by rounded `top`.
pub fn group_lines(tokens: &[Token], precision: u32) -> Vec<Line> {
    let mut buckets: BTreeMap<KeyF64, Vec<Token>> = BTreeMap::new();
    for token in tokens {
        buckets
            .entry(key_f64(round_to(token.top, precision)))
            .or_default()
            .push(token.clone());
    }

    buckets
        .into_iter()
        .map(|(top, mut tokens)| {
            // Stable: equal x0 keeps source order.
            tokens.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            Line {
                top: top.into_inner(),
                tokens,
            }
        })
        .collect()
}
