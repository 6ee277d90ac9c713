//! Shared strings table for Excel files.
//!
//! Excel stores repeated cell text once in `xl/sharedStrings.xml` and cells
//! refer to it by zero-based index. Every `<t>` element of the part becomes
//! one entry, in document order; the order is what gives the indices their
//! meaning, so the table is never sorted or deduplicated.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::xml::{push_entity, push_text};
use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{part_name, sml};
use crate::ooxml::opc::phys_pkg::ArchiveHandle;

// Performance: Pre-allocate typical capacities to reduce reallocations
const INITIAL_STRINGS_CAPACITY: usize = 256;

/// Shared strings table, indexed `0..len`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SharedStrings {
    /// The actual strings, in document order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table from a container.
    ///
    /// A workbook without a shared-strings part has an empty table; that is
    /// not an error.
    pub fn from_archive(archive: &mut ArchiveHandle) -> Result<Self> {
        match archive.read_member(part_name::SHARED_STRINGS)? {
            Some(content) => {
                let table = Self::parse(&content)?;
                tracing::debug!(count = table.len(), "parsed shared strings");
                Ok(table)
            },
            None => {
                tracing::debug!("no shared strings part, using empty table");
                Ok(Self::new())
            },
        }
    }

    /// Parse shared strings from xl/sharedStrings.xml content.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let mut strings = Vec::with_capacity(INITIAL_STRINGS_CAPACITY);
        let mut reader = Reader::from_reader(content);
        let mut buf = Vec::new();

        let mut in_text = false;
        let mut current = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == sml::SHARED_TEXT => {
                    in_text = true;
                    current.clear();
                },
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == sml::SHARED_TEXT => {
                    strings.push(String::new());
                },
                Ok(Event::Text(ref e)) if in_text => push_text(&mut current, e)?,
                Ok(Event::GeneralRef(ref e)) if in_text => push_entity(&mut current, e)?,
                Ok(Event::CData(ref e)) if in_text => {
                    current.push_str(std::str::from_utf8(e.as_ref())?);
                },
                Ok(Event::End(ref e)) if e.local_name().as_ref() == sml::SHARED_TEXT => {
                    in_text = false;
                    strings.push(std::mem::take(&mut current));
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Shared strings parse error: {}", e)));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(SharedStrings { strings })
    }

    /// Get a string by its index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Resolve a cell's reference, failing if the index is out of bounds.
    pub fn resolve(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(Error::InvalidReference {
            index,
            len: self.strings.len(),
        })
    }

    /// Get the number of strings in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Get all strings.
    #[inline]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}
