//! Header shading detection.
//!
//! Header cells of a cause list sit on gray fill rectangles. The probe
//! samples the fill under a token's midpoint and compares it with the
//! configured header color within a tolerance.

use crate::params::ParserParams;

use super::types::{Page, Token};

const WHITE: [f64; 3] = [1.0, 1.0, 1.0];

/// Decides whether a token sits on header shading.
pub trait ShadingProbe {
    fn is_header_shaded(&self, token: &Token, page: &Page) -> bool;
}

impl<F> ShadingProbe for F
where
    F: Fn(&Token, &Page) -> bool,
{
    fn is_header_shaded(&self, token: &Token, page: &Page) -> bool {
        self(token, page)
    }
}

/// Shading probe backed by the page's fill rectangles.
#[derive(Debug, Clone)]
pub struct FillShading {
    header_color: [f64; 3],
    tolerance: f64,
}

impl FillShading {
    pub fn new(header_color: [f64; 3], tolerance: f64) -> Self {
        Self {
            header_color,
            tolerance,
        }
    }

    pub fn from_params(params: &ParserParams) -> Self {
        Self::new(params.header_color, params.color_tolerance)
    }

    /// RGB fill at a point. The last painted rectangle wins; none is white.
    pub fn fill_at(page: &Page, x: f64, y: f64) -> [f64; 3] {
        page.rects
            .iter()
            .rev()
            .find(|r| r.bbox().contains(x, y))
            .map_or(WHITE, |r| r.rgb())
    }

    fn matches(&self, color: [f64; 3]) -> bool {
        color
            .iter()
            .zip(self.header_color.iter())
            .all(|(a, b)| (a - b).abs() <= self.tolerance)
    }
}

impl ShadingProbe for FillShading {
    fn is_header_shaded(&self, token: &Token, page: &Page) -> bool {
        self.matches(Self::fill_at(page, token.mid_x(), token.mid_y()))
    }
}
