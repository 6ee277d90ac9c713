//! Office Open XML (OOXML) spreadsheet reading.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): the in-memory ZIP container and part names
//! 2. **SpreadsheetML** (`xlsx`): workbook sheet list, shared strings and
//!    worksheet cell data
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetmark::ooxml::xlsx::Workbook;
//!
//! let workbook = Workbook::open("report.xlsx")?;
//! for name in workbook.sheet_names() {
//!     println!("{}", name);
//! }
//! # Ok::<(), sheetmark::Error>(())
//! ```
pub mod opc;
pub mod xlsx;

pub use opc::ArchiveHandle;
pub use xlsx::Workbook;
