//! Format-independent sheet data.
//!
//! A parsed sheet is a [`SheetMatrix`]: rows of resolved cell text. Cells
//! read from the XML start out as [`RawCell`] values and are resolved
//! against the shared-string table as each row completes.

pub mod types;

pub use types::{ColumnPolicy, RawCell, SheetMatrix};
