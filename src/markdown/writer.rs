/// Low-level writer for Markdown generation.
///
/// This module provides the `MarkdownWriter` struct which projects a
/// [`SheetMatrix`] into a pipe-delimited Markdown table.
///
/// Cell text is written verbatim: a `|` inside a cell is not escaped, and
/// rows are neither padded nor truncated to the header width.
use crate::common::Result;
use crate::sheet::SheetMatrix;
use super::config::MarkdownOptions;
use super::traits::ToMarkdown;

/// Table emitted for a sheet without rows.
pub const EMPTY_TABLE: &str = "| Empty table |\n|-|\n";

const DELIMITER: char = '|';
const SEPARATOR_CELL: &str = "-";

/// Low-level writer for efficient Markdown generation.
pub(crate) struct MarkdownWriter {
    /// The output buffer
    buffer: String,
}

impl MarkdownWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096), // Pre-allocate reasonable size
        }
    }

    /// Write a sheet as a Markdown table.
    pub fn write_table(&mut self, matrix: &SheetMatrix, has_header: bool) {
        let Some(first_row) = matrix.first_row() else {
            self.buffer.push_str(EMPTY_TABLE);
            return;
        };

        let data_start = if has_header {
            self.write_row(first_row);
            1
        } else {
            let labels: Vec<String> = (1..=first_row.len())
                .map(|i| format!("Column {}", i))
                .collect();
            self.write_row(&labels);
            0
        };

        self.write_separator(first_row.len());

        for row in &matrix.rows()[data_start..] {
            self.write_row(row);
        }
    }

    /// Write one pipe-delimited line.
    fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        self.buffer.push(DELIMITER);
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                self.buffer.push(DELIMITER);
            }
            self.buffer.push_str(cell.as_ref());
        }
        self.buffer.push(DELIMITER);
        self.buffer.push('\n');
    }

    /// Write the separator line for `columns` columns.
    fn write_separator(&mut self, columns: usize) {
        self.write_row(&vec![SEPARATOR_CELL; columns]);
    }

    /// Get the final markdown output.
    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Render a sheet as a Markdown table.
///
/// - An empty sheet renders [`EMPTY_TABLE`] whatever `has_header` says.
/// - With `has_header`, the first row supplies the column labels.
/// - Without it, the labels are `Column 1` … `Column n` for the width of
///   the first row and every row is data.
///
/// The separator always has as many columns as the header line.
pub fn render_table(matrix: &SheetMatrix, has_header: bool) -> String {
    let mut writer = MarkdownWriter::new();
    writer.write_table(matrix, has_header);
    writer.finish()
}

impl ToMarkdown for SheetMatrix {
    fn to_markdown_with_options(&self, options: &MarkdownOptions) -> Result<String> {
        Ok(render_table(self, options.has_header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_with_header() {
        let matrix = SheetMatrix::from(vec![["A", "B"], ["1", "2"], ["3", "4"]]);
        assert_eq!(render_table(&matrix, true), "|A|B|\n|-|-|\n|1|2|\n|3|4|\n");
    }

    #[test]
    fn test_render_without_header() {
        let matrix = SheetMatrix::from(vec![["1", "2"], ["3", "4"]]);
        assert_eq!(
            render_table(&matrix, false),
            "|Column 1|Column 2|\n|-|-|\n|1|2|\n|3|4|\n"
        );
    }

    #[test]
    fn test_render_empty_sheet() {
        let matrix = SheetMatrix::new();
        assert_eq!(render_table(&matrix, true), EMPTY_TABLE);
        assert_eq!(render_table(&matrix, false), EMPTY_TABLE);
    }

    #[test]
    fn test_header_only() {
        let matrix = SheetMatrix::from(vec![["Only"]]);
        assert_eq!(render_table(&matrix, true), "|Only|\n|-|\n");
    }

    #[test]
    fn test_irregular_rows_rendered_as_is() {
        let matrix = SheetMatrix::from(vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string()],
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
            vec![],
        ]);
        assert_eq!(
            render_table(&matrix, true),
            "|A|B|\n|-|-|\n|1|\n|x|y|z|\n||\n"
        );
    }

    #[test]
    fn test_pipes_in_cells_are_not_escaped() {
        let matrix = SheetMatrix::from(vec![["a|b"]]);
        assert_eq!(render_table(&matrix, false), "|Column 1|\n|-|\n|a|b|\n");
    }

    #[test]
    fn test_to_markdown_trait() {
        let matrix = SheetMatrix::from(vec![["h"], ["v"]]);
        assert_eq!(matrix.to_markdown().unwrap(), "|h|\n|-|\n|v|\n");
        let options = MarkdownOptions::new().with_header(false);
        assert_eq!(
            matrix.to_markdown_with_options(&options).unwrap(),
            "|Column 1|\n|-|\n|h|\n|v|\n"
        );
    }

    fn cell() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ]{0,6}"
    }

    proptest! {
        #[test]
        fn prop_separator_matches_header_width(
            rows in proptest::collection::vec(proptest::collection::vec(cell(), 0..6), 1..8),
            has_header in any::<bool>(),
        ) {
            let width = rows[0].len();
            let data_rows = if has_header { rows.len() - 1 } else { rows.len() };
            let rendered = render_table(&SheetMatrix::from(rows), has_header);
            let lines: Vec<&str> = rendered.lines().collect();

            prop_assert_eq!(lines.len(), 2 + data_rows);
            prop_assert_eq!(lines[1].matches('-').count(), width);
            prop_assert_eq!(lines[1].matches('|').count(), width.max(1) + 1);
            if !has_header {
                prop_assert_eq!(lines[0].matches("Column ").count(), width);
            }
        }
    }
}
