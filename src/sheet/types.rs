//! Cell and table types produced by the sheet data parser.

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::ooxml::xlsx::SharedStrings;

/// A cell as stored in the sheet stream, before shared strings are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCell {
    /// Index into the shared strings table (`t="s"`)
    SharedString(usize),
    /// Inline or numeric literal, taken verbatim
    Literal(String),
    /// Cell without any value content
    Empty,
}

impl RawCell {
    /// Resolve the cell to its text.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidReference`] if a shared-string index is
    /// out of bounds for `strings`.
    pub fn resolve(self, strings: &SharedStrings) -> Result<String> {
        match self {
            RawCell::SharedString(index) => strings.resolve(index).map(str::to_string),
            RawCell::Literal(text) => Ok(text),
            RawCell::Empty => Ok(String::new()),
        }
    }
}

/// How cells are placed within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Cells are emitted in document order; column gaps collapse, so cells
    /// at `A1` and `C1` form a two-element row.
    #[default]
    DocumentOrder,
    /// Cells are placed at the column named by their `r` reference and gaps
    /// are padded with empty strings; `A1` and `C1` form `["a", "", "c"]`.
    ///
    /// When two cells of a row name the same column, the later one replaces
    /// the earlier. A cell without a usable reference is appended at the end
    /// of the row.
    Positional,
}

/// Resolved cell text of one sheet, row by row.
///
/// Rows keep their own length; nothing pads them to a common width.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SheetMatrix {
    rows: Vec<Vec<String>>,
}

impl SheetMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    #[inline]
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// All rows in document order.
    #[inline]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The first row, if any.
    #[inline]
    pub fn first_row(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the matrix and return its rows.
    #[inline]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for SheetMatrix {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

impl<const N: usize> From<Vec<[&str; N]>> for SheetMatrix {
    fn from(rows: Vec<[&str; N]>) -> Self {
        rows.into_iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect::<Vec<Vec<String>>>()
            .into()
    }
}
