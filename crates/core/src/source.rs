//! Page sources.
//!
//! The parser does not read PDFs itself; a source supplies, per page, the
//! positioned tokens and fill rectangles produced by a text extraction
//! layer. `JsonPageSource` reads that geometry from a JSON dump.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{CauseListError, Result};
use crate::layout::{FillRect, Page, Token};

/// Supplier of page geometry in ascending page order.
pub trait PageSource {
    fn pages(&mut self) -> Result<Vec<Page>>;
}

impl PageSource for Vec<Page> {
    fn pages(&mut self) -> Result<Vec<Page>> {
        Ok(std::mem::take(self))
    }
}

#[derive(Debug, Deserialize)]
struct DocumentDump {
    pages: Vec<PageDump>,
}

#[derive(Debug, Deserialize)]
struct PageDump {
    #[serde(default)]
    number: Option<u32>,
    width: f64,
    height: f64,
    #[serde(default)]
    tokens: Vec<Token>,
    #[serde(default)]
    rects: Vec<FillRect>,
}

/// Page geometry read from JSON:
///
/// ```json
/// {"pages": [{"number": 1, "width": 612, "height": 792,
///             "tokens": [{"text": "SNO.", "x0": 40, "x1": 62, "top": 100, "bottom": 108}],
///             "rects": [{"x0": 36, "x1": 576, "top": 98, "bottom": 112, "fill": [0.8]}]}]}
/// ```
///
/// `number` defaults to the 1-based position in the array.
pub struct JsonPageSource<R> {
    reader: Option<R>,
}

impl<R: Read> JsonPageSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl JsonPageSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> PageSource for JsonPageSource<R> {
    fn pages(&mut self) -> Result<Vec<Page>> {
        let Some(reader) = self.reader.take() else {
            return Ok(Vec::new());
        };
        let dump: DocumentDump = serde_json::from_reader(reader)?;
        let pages: Vec<Page> = dump
            .pages
            .into_iter()
            .enumerate()
            .map(|(i, p)| Page {
                number: p.number.unwrap_or(i as u32 + 1),
                width: p.width,
                height: p.height,
                tokens: p.tokens,
                rects: p.rects,
            })
            .collect();
        validate_pages(&pages)?;
        Ok(pages)
    }
}

/// Check the source contract: strictly ascending page numbers and finite
/// geometry.
pub fn validate_pages(pages: &[Page]) -> Result<()> {
    for pair in pages.windows(2) {
        if pair[1].number <= pair[0].number {
            return Err(CauseListError::InvalidSource(format!(
                "page {} follows page {}",
                pair[1].number, pair[0].number
            )));
        }
    }
    for page in pages {
        if !(page.width.is_finite() && page.height.is_finite()) {
            return Err(CauseListError::InvalidSource(format!(
                "page {} has non-finite size",
                page.number
            )));
        }
        let bad_token = page
            .tokens
            .iter()
            .find(|t| ![t.x0, t.x1, t.top, t.bottom].iter().all(|v| v.is_finite()));
        if let Some(token) = bad_token {
            return Err(CauseListError::InvalidSource(format!(
                "token {:?} on page {} has non-finite geometry",
                token.text, page.number
            )));
        }
    }
    Ok(())
}
