/// Core trait for Markdown conversion.
///
/// This module defines the `ToMarkdown` trait that enables types to be
/// converted to Markdown format.
use crate::common::Result;
use super::config::MarkdownOptions;

/// Core trait for types that can be converted to Markdown.
///
/// # Examples
///
/// ```rust
/// use sheetmark::markdown::{MarkdownOptions, ToMarkdown};
/// use sheetmark::sheet::SheetMatrix;
///
/// # fn main() -> Result<(), sheetmark::Error> {
/// let matrix = SheetMatrix::from(vec![["A", "B"], ["1", "2"]]);
/// assert_eq!(matrix.to_markdown()?, "|A|B|\n|-|-|\n|1|2|\n");
///
/// let options = MarkdownOptions::new().with_header(false);
/// assert!(matrix.to_markdown_with_options(&options)?.starts_with("|Column 1|Column 2|"));
/// # Ok(())
/// # }
/// ```
pub trait ToMarkdown {
    /// Convert this item to Markdown with default options.
    fn to_markdown(&self) -> Result<String> {
        self.to_markdown_with_options(&MarkdownOptions::default())
    }

    /// Convert this item to Markdown with custom options.
    ///
    /// # Arguments
    ///
    /// * `options` - Configuration for the conversion
    fn to_markdown_with_options(&self, options: &MarkdownOptions) -> Result<String>;
}
