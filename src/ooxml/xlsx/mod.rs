//! Excel (.xlsx) spreadsheet support.
//!
//! This module reads the parts of an .xlsx package that carry cell text:
//!
//! - `SharedStrings`: the shared strings table (`xl/sharedStrings.xml`)
//! - `SheetDirectory`: sheet names and ids from `xl/workbook.xml`
//! - `worksheet_parser`: per-sheet cell data (`xl/worksheets/sheetN.xml`)
//! - `Workbook`: ties the three together for one conversion
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetmark::ooxml::xlsx::Workbook;
//! use sheetmark::sheet::ColumnPolicy;
//!
//! let mut workbook = Workbook::open("workbook.xlsx")?;
//! let matrix = workbook.sheet_matrix("Sheet1", ColumnPolicy::DocumentOrder)?;
//! println!("{} rows", matrix.len());
//! # Ok::<(), sheetmark::Error>(())
//! ```

pub mod parsers;
mod shared_strings;
#[cfg(test)]
pub(crate) mod test_support;
mod workbook;

pub use parsers::workbook_parser::{SheetDirectory, SheetEntry, SheetId};
pub use parsers::worksheet_parser::parse_sheet;
pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
