//! Provides access to the physical package (ZIP container) of an .xlsx file.
//!
//! The whole container is read into memory once and members are
//! decompressed on demand. Nothing is extracted to disk, so dropping the
//! [`ArchiveHandle`] releases every resource a conversion acquired, on the
//! success path and on every error path alike.

use crate::common::{Error, Result};
use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// An opened spreadsheet container.
///
/// Owns the raw archive bytes for the duration of a single conversion.
pub struct ArchiveHandle {
    /// The underlying ZIP archive over the owned data buffer
    archive: ZipArchive<Cursor<Vec<u8>>>,
    /// Where the archive came from, for error messages
    source: String,
}

impl ArchiveHandle {
    /// Open a container from a file path.
    ///
    /// # Errors
    /// Returns [`Error::Archive`] if the file cannot be read or is not a
    /// valid ZIP container.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let data = std::fs::read(path)
            .map_err(|e| Error::Archive(format!("cannot read '{}': {}", source, e)))?;
        Self::with_source(data, source)
    }

    /// Create a handle from owned bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_source(data, "<memory>".to_string())
    }

    /// Create a handle by draining a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| Error::Archive(format!("cannot read archive stream: {}", e)))?;
        Self::from_bytes(data)
    }

    fn with_source(data: Vec<u8>, source: String) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| Error::Archive(format!("'{}' is not a valid container: {}", source, e)))?;
        tracing::debug!(source = %source, members = archive.len(), "opened container");
        Ok(Self { archive, source })
    }

    /// Read and decompress a member by name.
    ///
    /// Returns `Ok(None)` if the archive has no member with that name.
    pub fn read_member(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(Error::Archive(format!(
                    "cannot open member '{}' of '{}': {}",
                    name, self.source, e
                )));
            },
        };

        let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut data).map_err(|e| {
            Error::Archive(format!(
                "cannot decompress member '{}' of '{}': {}",
                name, self.source, e
            ))
        })?;
        Ok(Some(data))
    }

    /// Check if a specific member exists in the container.
    pub fn contains(&self, name: &str) -> bool {
        self.archive.file_names().any(|member| member == name)
    }

    /// List all member names in the container.
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(String::from).collect()
    }

    /// Get the number of members in the container.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the container has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Where this container was loaded from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("source", &self.source)
            .field("members", &self.archive.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::test_support::zip_members;

    #[test]
    fn test_read_existing_and_missing_members() {
        let data = zip_members(&[("xl/workbook.xml", "<workbook/>"), ("a/b.txt", "hello")]);
        let mut handle = ArchiveHandle::from_bytes(data).unwrap();

        assert_eq!(handle.len(), 2);
        assert!(handle.contains("a/b.txt"));
        assert!(!handle.contains("a/c.txt"));
        assert_eq!(handle.read_member("a/b.txt").unwrap().unwrap(), b"hello");
        assert!(handle.read_member("a/c.txt").unwrap().is_none());

        let mut names = handle.member_names();
        names.sort();
        assert_eq!(names, vec!["a/b.txt", "xl/workbook.xml"]);
    }

    #[test]
    fn test_invalid_container() {
        let err = ArchiveHandle::from_bytes(b"definitely not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Archive(_)));
    }

    #[test]
    fn test_missing_file_is_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArchiveHandle::open(dir.path().join("missing.xlsx")).unwrap_err();
        assert!(matches!(err, Error::Archive(_)));
    }
}
