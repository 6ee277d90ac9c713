//! Sheetmark - convert spreadsheet sheets to Markdown tables
//!
//! This library reads Office Open XML workbooks (.xlsx) and renders a single
//! sheet as a GitHub-flavored Markdown table. It streams the workbook parts
//! with `quick-xml` straight out of an in-memory `zip` archive, so nothing is
//! ever extracted to disk.
//!
//! # Features
//!
//! - **Sheet listing**: names of all sheets in workbook order
//! - **Sheet conversion**: one sheet to one Markdown table, with either the
//!   first row or synthesized `Column N` labels as the header
//! - **Batch conversion**: many files and sheets with per-item isolation,
//!   optionally in parallel
//! - **Merging**: concatenate converted files into one document
//!
//! # Example - Converting a sheet
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for name in sheetmark::list_sheet_names("report.xlsx")? {
//!     let table = sheetmark::convert_sheet("report.xlsx", &name, true)?;
//!     println!("## {}\n\n{}", name, table);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Working with the parsed sheet
//!
//! ```no_run
//! use sheetmark::ooxml::xlsx::Workbook;
//! use sheetmark::sheet::ColumnPolicy;
//! use sheetmark::markdown::ToMarkdown;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = Workbook::open("report.xlsx")?;
//! let matrix = workbook.sheet_matrix("Summary", ColumnPolicy::Positional)?;
//! println!("{} rows", matrix.len());
//! println!("{}", matrix.to_markdown()?);
//! # Ok(())
//! # }
//! ```

/// Error types and XML text helpers shared by all modules
pub mod common;

/// Persistent conversion settings
pub mod config;

/// Conversion entry points, batch conversion and format dispatch
pub mod convert;

/// Markdown table rendering and merging
pub mod markdown;

/// OOXML (Office Open XML) workbook parsing
///
/// This module reads the parts of an .xlsx package needed to extract cell
/// text: the workbook sheet list, the shared-string table and worksheets.
pub mod ooxml;

/// Format-independent sheet data types
pub mod sheet;

// Re-export commonly used types for convenience
pub use common::{Error, ErrorKind, Result};
pub use config::Settings;
pub use convert::{convert_sheet, convert_sheet_to, convert_sheet_with_options, list_sheet_names};
pub use markdown::MarkdownOptions;
pub use sheet::{ColumnPolicy, SheetMatrix};
