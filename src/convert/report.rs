//! Outcome of a batch conversion.
//!
//! Every sheet (or non-spreadsheet input) of a batch is one [`BatchItem`].
//! A failed item records its error kind and message and never stops the
//! items after it.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::common::{Error, ErrorKind};

/// Why a batch item failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Kind of the error that aborted the item
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
}

impl From<&Error> for ItemFailure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// One converted (or failed) unit of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// The input path or URL
    pub input: String,
    /// The sheet, for spreadsheet inputs
    pub sheet: Option<String>,
    /// Written file, or the failure
    pub outcome: Result<PathBuf, ItemFailure>,
}

impl BatchItem {
    /// A successful item.
    pub fn converted(input: &str, sheet: Option<&str>, output: PathBuf) -> Self {
        Self {
            input: input.to_string(),
            sheet: sheet.map(str::to_string),
            outcome: Ok(output),
        }
    }

    /// A failed item; the failure is logged.
    pub fn failed(input: &str, sheet: Option<&str>, err: &Error) -> Self {
        tracing::warn!(input, sheet, error = %err, "conversion failed");
        Self {
            input: input.to_string(),
            sheet: sheet.map(str::to_string),
            outcome: Err(ItemFailure::from(err)),
        }
    }

    /// Whether the item converted.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for BatchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)?;
        if let Some(sheet) = &self.sheet {
            write!(f, " [{}]", sheet)?;
        }
        match &self.outcome {
            Ok(path) => write!(f, " -> {}", path.display()),
            Err(failure) => write!(f, ": {}", failure),
        }
    }
}

/// Items of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    items: Vec<BatchItem>,
}

impl BatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item.
    #[inline]
    pub fn push(&mut self, item: BatchItem) {
        self.items.push(item);
    }

    /// Append all items of another report.
    pub fn extend(&mut self, other: BatchReport) {
        self.items.extend(other.items);
    }

    /// All items.
    #[inline]
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Paths of the files written.
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.as_ref().ok().map(PathBuf::as_path))
    }

    /// Items that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| !item.is_ok())
    }

    /// Number of successful items.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_ok()).count()
    }

    /// Number of failed items.
    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Whether every item converted.
    pub fn is_success(&self) -> bool {
        self.items.iter().all(BatchItem::is_ok)
    }
}

impl FromIterator<BatchItem> for BatchReport {
    fn from_iter<I: IntoIterator<Item = BatchItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report: BatchReport = [
            BatchItem::converted("a.xlsx", Some("S1"), PathBuf::from("a-S1.md")),
            BatchItem::failed("a.xlsx", Some("S2"), &Error::SheetNotFound("S2".to_string())),
            BatchItem::converted("b.xlsx", Some("S1"), PathBuf::from("b-S1.md")),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(
            report.outputs().collect::<Vec<_>>(),
            [Path::new("a-S1.md"), Path::new("b-S1.md")]
        );

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.outcome.as_ref().unwrap_err().kind, ErrorKind::SheetNotFound);
        assert_eq!(failure.to_string(), "a.xlsx [S2]: Sheet not found: S2");
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(BatchReport::new().is_success());
    }
}
