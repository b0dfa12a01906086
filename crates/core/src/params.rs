//! Parser parameters.
//!
//! Contains ParserParams, the tolerances and marker texts that control how
//! lines are grouped, how the header is detected and how tokens land in
//! columns.

use serde::Deserialize;

/// Which horizontal coordinate of a token decides its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignAnchor {
    /// The token's left edge (`x0`).
    #[default]
    Start,
    /// The midpoint of `x0` and `x1`.
    Midpoint,
}

/// Parameters for table reconstruction.
///
/// The defaults are tuned for the daily cause list layout: gray header
/// cells, four columns and a "NEW DELHI" signature line closing each
/// court's table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserParams {
    /// RGB fill of shaded header cells.
    pub header_color: [f64; 3],

    /// Per-component absolute tolerance when comparing fill colors.
    pub color_tolerance: f64,

    /// Substrings that must all appear in a line's normalized text for it to
    /// count as a header when no shading is found.
    pub header_anchors: Vec<String>,

    /// Gap subtracted from the next column's left edge to form a right edge.
    pub column_gap: f64,

    /// Distance from the page's right edge to the last column's right edge.
    pub right_margin: f64,

    /// Coordinate used to place a token into a column.
    pub assign_anchor: AssignAnchor,

    /// Slack added on both sides of a column range during assignment.
    pub assign_tolerance: f64,

    /// Treat the line that ends header collection as layout only. When false
    /// it is also read as the first line of the table.
    pub skip_trigger_line: bool,

    /// Text that closes the current table when it starts at the first column.
    pub table_end_marker: String,

    /// Maximum distance between the marker's `x0` and the first column's `x0`.
    pub table_end_x_tolerance: f64,

    /// Page banners that repeat inside a table and are skipped there.
    pub banner_patterns: Vec<String>,

    /// Decimal places a token's `top` is rounded to when forming lines.
    pub line_precision: u32,
}

impl Default for ParserParams {
    fn default() -> Self {
        Self {
            header_color: [0.8, 0.8, 0.8],
            color_tolerance: 0.05,
            header_anchors: vec!["SNO".to_string(), "CASE".to_string()],
            column_gap: 2.0,
            right_margin: 20.0,
            assign_anchor: AssignAnchor::Start,
            assign_tolerance: 0.0,
            skip_trigger_line: false,
            table_end_marker: "NEW DELHI".to_string(),
            table_end_x_tolerance: 15.0,
            banner_patterns: vec![
                "DAILY CAUSE LIST FOR DATED".to_string(),
                "COURT NO".to_string(),
            ],
            line_precision: 1,
        }
    }
}

impl ParserParams {
    /// Load parameters from a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
