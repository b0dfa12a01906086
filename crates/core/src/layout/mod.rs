//! Page geometry for table reconstruction.
//!
//! This module contains:
//! - Geometry types supplied by the token source (Token, FillRect, Page)
//! - Grouping of page tokens into physical lines
//! - Header shading detection

pub mod lines;
pub mod shading;
pub mod types;

pub use lines::group_lines;
pub use shading::{FillShading, ShadingProbe};
pub use types::{BBox, FillColor, FillRect, Line, Page, Token};
