//! Spreadsheet to Markdown conversion entry points.
//!
//! The free functions here are the interface a front end needs:
//! [`list_sheet_names`] to populate a sheet picker and [`convert_sheet`] /
//! [`convert_sheet_to`] to convert one sheet. [`Converter`] adds batch
//! conversion with per-item isolation and dispatch of other document kinds.
//!
//! A conversion runs `open container -> sheet directory -> shared strings
//! -> sheet data -> render` strictly in sequence. The container is held in
//! memory and released when the conversion returns, whether it succeeded
//! or not.

mod dispatch;
mod report;

use std::io::Write;
use std::path::Path;

use crate::common::Result;
use crate::markdown::{MarkdownOptions, render_table};
use crate::ooxml::xlsx::Workbook;

pub use dispatch::{
    Converter, DocumentHandler, DocumentKind, SheetSelection, sheet_output_path, sheet_output_paths,
};
pub use report::{BatchItem, BatchReport, ItemFailure};

/// List the sheet names of a workbook in workbook order.
///
/// # Examples
///
/// ```rust,no_run
/// let names = sheetmark::list_sheet_names("report.xlsx")?;
/// # Ok::<(), sheetmark::Error>(())
/// ```
pub fn list_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(Workbook::open(path)?.sheet_names())
}

/// Convert one sheet to a Markdown table.
///
/// # Errors
///
/// Fails with the error kind of the first stage that fails: archive,
/// malformed workbook, sheet not found, malformed sheet or invalid
/// shared-string reference.
pub fn convert_sheet<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    has_header: bool,
) -> Result<String> {
    let options = MarkdownOptions::new().with_header(has_header);
    convert_sheet_with_options(path, sheet_name, &options)
}

/// Convert one sheet to a Markdown table with explicit options.
pub fn convert_sheet_with_options<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    options: &MarkdownOptions,
) -> Result<String> {
    let path = path.as_ref();
    let mut workbook = Workbook::open(path)?;
    let matrix = workbook.sheet_matrix(sheet_name, options.column_policy)?;
    tracing::debug!(
        path = %path.display(),
        sheet = sheet_name,
        rows = matrix.len(),
        "rendering sheet"
    );
    Ok(render_table(&matrix, options.has_header))
}

/// Convert one sheet and write the table to `sink`.
pub fn convert_sheet_to<P, W>(
    path: P,
    sheet_name: &str,
    options: &MarkdownOptions,
    sink: &mut W,
) -> Result<()>
where
    P: AsRef<Path>,
    W: Write + ?Sized,
{
    let markdown = convert_sheet_with_options(path, sheet_name, options)?;
    sink.write_all(markdown.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Reduce a name to characters that are safe in file names.
///
/// Keeps alphanumerics (in any script), spaces, `-` and `_`, then trims
/// trailing whitespace.
///
/// ```rust
/// assert_eq!(sheetmark::convert::safe_filename("Q1/Q2: totals?"), "Q1Q2 totals");
/// ```
pub fn safe_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().to_string()
}
