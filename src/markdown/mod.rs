/// Markdown conversion functionality for spreadsheets.
///
/// This module projects parsed sheets into pipe-delimited Markdown tables
/// and merges Markdown files.
///
/// # Quick Start
///
/// ```rust
/// use sheetmark::markdown::render_table;
/// use sheetmark::sheet::SheetMatrix;
///
/// let matrix = SheetMatrix::from(vec![["A", "B"], ["1", "2"], ["3", "4"]]);
/// assert_eq!(render_table(&matrix, true), "|A|B|\n|-|-|\n|1|2|\n|3|4|\n");
/// ```
///
/// # Architecture
///
/// - [`ToMarkdown`] trait: Core trait for types that can be converted to Markdown
/// - [`MarkdownOptions`]: Configuration for conversion behavior
/// - [`writer`]: Table rendering
/// - [`merge`]: Concatenation of Markdown files
pub mod config;
pub mod merge;
pub mod traits;
pub mod writer;

pub use config::MarkdownOptions;
pub use merge::{MERGED_FILE_NAME, merge_markdown_files};
pub use traits::ToMarkdown;
pub use writer::{EMPTY_TABLE, render_table};
