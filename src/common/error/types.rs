//! Unified error types for sheetmark.
//!
//! Every stage of a conversion (container access, workbook index, shared
//! strings, sheet data) reports through the single [`Error`] type so that a
//! caller can tell the failure kinds apart without knowing which parser
//! produced them.
use thiserror::Error;

/// Main error type for sheetmark operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is unreadable or not a valid ZIP container
    #[error("Archive error: {0}")]
    Archive(String),

    /// `xl/workbook.xml` is missing or cannot be parsed
    #[error("Malformed workbook: {0}")]
    MalformedWorkbook(String),

    /// No sheet in the workbook directory carries the requested name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The directory points at a sheet stream the archive does not contain
    #[error("Malformed sheet {sheet_id}: member '{member}' is missing or unreadable")]
    MalformedSheet { sheet_id: u32, member: String },

    /// A cell references a shared string past the end of the table
    #[error("Invalid shared string reference: index {index} out of bounds for table of {len}")]
    InvalidReference { index: usize, len: usize },

    /// A shared-string cell whose index is absent or not a number
    #[error("Invalid shared string reference: {0}")]
    InvalidReferenceText(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Settings file could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input kind without a registered converter
    #[error("Unsupported input: {0}")]
    Unsupported(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], used in batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Archive,
    MalformedWorkbook,
    SheetNotFound,
    MalformedSheet,
    InvalidReference,
    Io,
    Xml,
    Config,
    Unsupported,
    Other,
}

impl Error {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Archive(_) => ErrorKind::Archive,
            Error::MalformedWorkbook(_) => ErrorKind::MalformedWorkbook,
            Error::SheetNotFound(_) => ErrorKind::SheetNotFound,
            Error::MalformedSheet { .. } => ErrorKind::MalformedSheet,
            Error::InvalidReference { .. } | Error::InvalidReferenceText(_) => {
                ErrorKind::InvalidReference
            },
            Error::Io(_) => ErrorKind::Io,
            Error::Xml(_) => ErrorKind::Xml,
            Error::Config(_) => ErrorKind::Config,
            Error::Unsupported(_) => ErrorKind::Unsupported,
            Error::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result type for sheetmark operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::SheetNotFound("Sheet9".to_string()).kind(),
            ErrorKind::SheetNotFound
        );
        assert_eq!(
            Error::InvalidReference { index: 3, len: 3 }.kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(
            Error::InvalidReferenceText("abc".to_string()).kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(
            Error::MalformedSheet {
                sheet_id: 2,
                member: "xl/worksheets/sheet2.xml".to_string()
            }
            .kind(),
            ErrorKind::MalformedSheet
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidReference { index: 5, len: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid shared string reference: index 5 out of bounds for table of 5"
        );
        assert_eq!(
            Error::SheetNotFound("Totals".to_string()).to_string(),
            "Sheet not found: Totals"
        );
    }
}
