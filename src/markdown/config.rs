/// Configuration types for Markdown conversion.
///
/// This module defines the options that control how a sheet is read and
/// projected into a Markdown table.
use crate::sheet::ColumnPolicy;

/// Configuration options for spreadsheet to Markdown conversion.
///
/// # Examples
///
/// ```rust
/// use sheetmark::markdown::MarkdownOptions;
/// use sheetmark::sheet::ColumnPolicy;
///
/// // Create with defaults
/// let options = MarkdownOptions::default();
///
/// // Or customize
/// let options = MarkdownOptions::new()
///     .with_header(false)
///     .with_column_policy(ColumnPolicy::Positional);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Whether the first row holds the column labels
    pub has_header: bool,
    /// How cells are placed within a row
    pub column_policy: ColumnPolicy,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            column_policy: ColumnPolicy::DocumentOrder,
        }
    }
}

impl MarkdownOptions {
    /// Create a new `MarkdownOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the first row is used as the header.
    ///
    /// When disabled, the header is synthesized as `Column 1`, `Column 2`, …
    /// and the first row is rendered as data.
    #[inline]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the column placement policy.
    #[inline]
    pub fn with_column_policy(mut self, policy: ColumnPolicy) -> Self {
        self.column_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_options_builder() {
        let options = MarkdownOptions::new()
            .with_header(false)
            .with_column_policy(ColumnPolicy::Positional);

        assert!(!options.has_header);
        assert_eq!(options.column_policy, ColumnPolicy::Positional);
    }

    #[test]
    fn test_markdown_options_default() {
        let options = MarkdownOptions::default();
        assert!(options.has_header);
        assert_eq!(options.column_policy, ColumnPolicy::DocumentOrder);
    }
}
