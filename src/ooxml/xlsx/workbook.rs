//! Excel Workbook implementation.
//!
//! [`Workbook`] owns the container of one conversion together with the
//! parsed sheet directory. The shared strings table is parsed the first
//! time a sheet is read and reused for every later sheet of the same
//! workbook.

use std::path::Path;

use crate::common::Result;
use crate::ooxml::opc::phys_pkg::ArchiveHandle;
use crate::ooxml::xlsx::SharedStrings;
use crate::sheet::{ColumnPolicy, SheetMatrix};

use super::parsers::workbook_parser::{SheetDirectory, SheetId};
use super::parsers::worksheet_parser;

/// An opened .xlsx workbook.
#[derive(Debug)]
pub struct Workbook {
    /// The underlying container
    archive: ArchiveHandle,
    /// Sheet name to id mapping from workbook.xml
    directory: SheetDirectory,
    /// Shared strings, parsed on first use
    shared_strings: Option<SharedStrings>,
}

impl Workbook {
    /// Open a workbook from a file path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use sheetmark::ooxml::xlsx::Workbook;
    ///
    /// let workbook = Workbook::open("report.xlsx")?;
    /// for name in workbook.sheet_names() {
    ///     println!("Sheet: {}", name);
    /// }
    /// # Ok::<(), sheetmark::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(ArchiveHandle::open(path)?)
    }

    /// Create a workbook from an opened container.
    pub fn from_archive(mut archive: ArchiveHandle) -> Result<Self> {
        let directory = SheetDirectory::from_archive(&mut archive)?;
        Ok(Self {
            archive,
            directory,
            shared_strings: None,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.directory.names().map(str::to_string).collect()
    }

    /// The parsed sheet directory.
    #[inline]
    pub fn directory(&self) -> &SheetDirectory {
        &self.directory
    }

    /// Resolve a sheet name to its id.
    #[inline]
    pub fn sheet_id(&self, name: &str) -> Result<SheetId> {
        self.directory.resolve(name)
    }

    /// The shared strings table, parsed on first access.
    pub fn shared_strings(&mut self) -> Result<&SharedStrings> {
        self.load_shared_strings()?;
        Ok(self.shared_strings.get_or_insert_with(SharedStrings::new))
    }

    /// Read the cells of the named sheet.
    ///
    /// The name is resolved before any sheet data is read, so an unknown
    /// name fails without touching the worksheet streams.
    pub fn sheet_matrix(&mut self, name: &str, policy: ColumnPolicy) -> Result<SheetMatrix> {
        let sheet_id = self.directory.resolve(name)?;
        self.load_shared_strings()?;

        let strings = self.shared_strings.get_or_insert_with(SharedStrings::new);
        worksheet_parser::parse_sheet(&mut self.archive, sheet_id, strings, policy)
    }

    fn load_shared_strings(&mut self) -> Result<()> {
        if self.shared_strings.is_none() {
            self.shared_strings = Some(SharedStrings::from_archive(&mut self.archive)?);
        }
        Ok(())
    }
}
