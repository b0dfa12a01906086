//! Geometry types shared by the source, the header matcher and the
//! column assigner.
//!
//! Coordinates use a top-left origin: `top < bottom` and `x0 < x1`.

use serde::{Deserialize, Serialize};

const WHITE: [f64; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive point containment.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.top <= y && y <= self.bottom
    }
}

/// A positioned text fragment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Token {
    pub fn new(text: &str, x0: f64, x1: f64, top: f64, bottom: f64) -> Self {
        Self {
            text: text.to_string(),
            x0,
            x1,
            top,
            bottom,
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox {
            x0: self.x0,
            top: self.top,
            x1: self.x1,
            bottom: self.bottom,
        }
    }

    pub fn mid_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Non-stroking fill color as reported by the source.
///
/// One component is DeviceGray, three DeviceRGB, four DeviceCMYK.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillColor(pub Vec<f64>);

impl FillColor {
    pub fn gray(g: f64) -> Self {
        Self(vec![g])
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self(vec![r, g, b])
    }

    /// Normalize to RGB. Unsupported component counts read as white.
    pub fn to_rgb(&self) -> [f64; 3] {
        match self.0.as_slice() {
            [g] => [*g, *g, *g],
            [r, g, b] => [*r, *g, *b],
            [c, m, y, k] => [
                (1.0 - c) * (1.0 - k),
                (1.0 - m) * (1.0 - k),
                (1.0 - y) * (1.0 - k),
            ],
            _ => WHITE,
        }
    }
}

/// A filled rectangle; `fill: None` is treated as white.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillRect {
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
    #[serde(default)]
    pub fill: Option<FillColor>,
}

impl FillRect {
    pub fn bbox(&self) -> BBox {
        BBox {
            x0: self.x0,
            top: self.top,
            x1: self.x1,
            bottom: self.bottom,
        }
    }

    pub fn rgb(&self) -> [f64; 3] {
        self.fill.as_ref().map_or(WHITE, FillColor::to_rgb)
    }
}

/// One page of source geometry. `number` is 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub number: u32,
    pub width: f64,
    pub height: f64,
    pub tokens: Vec<Token>,
    pub rects: Vec<FillRect>,
}

impl Page {
    pub fn new(number: u32, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            tokens: Vec::new(),
            rects: Vec::new(),
        }
    }
}

/// Tokens sharing one rounded `top`, ordered left to right. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub top: f64,
    pub tokens: Vec<Token>,
}

impl Line {
    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Token texts joined with single spaces.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        parts.join(" ")
    }
}
