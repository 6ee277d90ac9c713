//! Parser for Excel workbook.xml files.
//!
//! The `<sheets>` element of the workbook part is the sheet directory: it
//! maps each sheet's display name to the relationship id (`r:id="rId3"`)
//! whose numeric suffix selects the worksheet stream
//! `xl/worksheets/sheet3.xml`.

use std::fmt;

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{namespace, part_name, sml};
use crate::ooxml::opc::phys_pkg::ArchiveHandle;

// Performance: Pre-allocate typical capacity for worksheets
const INITIAL_SHEETS_CAPACITY: usize = 16;

/// Internal identifier of a worksheet stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(u32);

impl SheetId {
    /// Create an id; sheet ids are positive.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// The raw numeric id.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Member name of the worksheet stream this id selects.
    #[inline]
    pub fn part_name(self) -> String {
        part_name::worksheet(self.0)
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the sheet directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Display name shown on the sheet tab
    pub name: String,
    /// Identifier of the sheet's data stream
    pub id: SheetId,
}

/// Sheet directory of a workbook, in workbook order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SheetDirectory {
    entries: Vec<SheetEntry>,
}

impl SheetDirectory {
    /// Load the directory from a container.
    ///
    /// # Errors
    /// Returns [`Error::MalformedWorkbook`] if the workbook part is missing
    /// or cannot be parsed.
    pub fn from_archive(archive: &mut ArchiveHandle) -> Result<Self> {
        let content = archive.read_member(part_name::WORKBOOK)?.ok_or_else(|| {
            Error::MalformedWorkbook(format!(
                "'{}' has no {} part",
                archive.source(),
                part_name::WORKBOOK
            ))
        })?;

        let directory = Self::parse(&content)?;
        tracing::debug!(sheets = directory.len(), "parsed sheet directory");
        Ok(directory)
    }

    /// Parse workbook.xml content into a sheet directory.
    pub fn parse(content: &[u8]) -> Result<Self> {
        parse_entries(content)
            .map(|entries| Self { entries })
            .map_err(|e| match e {
                Error::MalformedWorkbook(_) => e,
                other => Error::MalformedWorkbook(other.to_string()),
            })
    }

    /// Resolve a display name to its sheet id.
    ///
    /// The match is exact and case-sensitive; with duplicate names the first
    /// entry wins.
    pub fn resolve(&self, name: &str) -> Result<SheetId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Sheet names in workbook order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// All directory entries.
    #[inline]
    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    /// Number of sheets.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the workbook lists no sheets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SheetEntry> for SheetDirectory {
    fn from_iter<I: IntoIterator<Item = SheetEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn parse_entries(content: &[u8]) -> Result<Vec<SheetEntry>> {
    let mut entries = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);
    let mut reader = NsReader::from_reader(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                saw_root = true;
                if e.local_name().as_ref() == sml::SHEET {
                    entries.push(parse_sheet_element(&reader, e)?);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Workbook parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::MalformedWorkbook("workbook part is empty".to_string()));
    }
    Ok(entries)
}

/// Extract name and id from a `<sheet>` element.
///
/// The id is the `id` attribute in the relationships namespace, whatever
/// prefix the document binds to it.
fn parse_sheet_element(
    reader: &NsReader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<SheetEntry> {
    let mut name = None;
    let mut rel_id = None;

    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == sml::ATTR_NAME {
            name = Some(attr.unescape_value()?.into_owned());
            continue;
        }

        let (ns, local) = reader.resolve_attribute(attr.key);
        let in_relationships = matches!(
            ns,
            ResolveResult::Bound(Namespace(uri)) if namespace::is_relationships(uri)
        );
        if in_relationships && local.as_ref() == sml::ATTR_REL_ID {
            rel_id = Some(attr.unescape_value()?.into_owned());
        }
    }

    let name = name.ok_or_else(|| {
        Error::MalformedWorkbook("<sheet> element without a name attribute".to_string())
    })?;
    let rel_id = rel_id.ok_or_else(|| {
        Error::MalformedWorkbook(format!("sheet '{}' has no relationship id", name))
    })?;
    let id = parse_rel_id(&rel_id).ok_or_else(|| {
        Error::MalformedWorkbook(format!(
            "sheet '{}' has unusable relationship id '{}'",
            name, rel_id
        ))
    })?;

    Ok(SheetEntry { name, id })
}

/// `rId7` -> 7.
fn parse_rel_id(rel_id: &str) -> Option<SheetId> {
    let digits = rel_id.strip_prefix(sml::REL_ID_PREFIX).unwrap_or(rel_id);
    let id = atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok()?;
    SheetId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::test_support::{workbook_xml, zip_members};
    use proptest::prelude::*;

    #[test]
    fn test_parse_directory() {
        let xml = workbook_xml(&[("Summary", 1), ("Data 2024", 3), ("R&D", 2)]);
        let dir = SheetDirectory::parse(xml.as_bytes()).unwrap();

        assert_eq!(dir.len(), 3);
        assert_eq!(dir.names().collect::<Vec<_>>(), ["Summary", "Data 2024", "R&D"]);
        assert_eq!(dir.resolve("Data 2024").unwrap().get(), 3);
        assert_eq!(dir.resolve("R&D").unwrap().part_name(), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn test_resolve_is_exact_and_case_sensitive() {
        let xml = workbook_xml(&[("Sheet1", 1)]);
        let dir = SheetDirectory::parse(xml.as_bytes()).unwrap();

        assert!(matches!(dir.resolve("sheet1"), Err(Error::SheetNotFound(_))));
        assert!(matches!(dir.resolve("Sheet1 "), Err(Error::SheetNotFound(_))));
        assert!(dir.resolve("Sheet1").is_ok());
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let xml = workbook_xml(&[("Twin", 4), ("Twin", 5)]);
        let dir = SheetDirectory::parse(xml.as_bytes()).unwrap();
        assert_eq!(dir.resolve("Twin").unwrap().get(), 4);
    }

    #[test]
    fn test_missing_relationship_id() {
        let xml = r#"<workbook><sheets><sheet name="A" sheetId="1"/></sheets></workbook>"#;
        let err = SheetDirectory::parse(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_non_numeric_relationship_id() {
        let xml = format!(
            r#"<workbook xmlns:r="{}"><sheets><sheet name="A" r:id="rIdX"/></sheets></workbook>"#,
            std::str::from_utf8(namespace::RELATIONSHIPS).unwrap()
        );
        let err = SheetDirectory::parse(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_relationship_id_matched_by_namespace() {
        let xml = concat!(
            r#"<workbook xmlns:rel="http://purl.oclc.org/ooxml/officeDocument/relationships" "#,
            r#"xmlns:x="urn:vendor"><sheets>"#,
            r#"<sheet name="A" rel:id="rId4" x:id="rId9"/>"#,
            r#"</sheets></workbook>"#,
        );
        let dir = SheetDirectory::parse(xml.as_bytes()).unwrap();
        assert_eq!(dir.resolve("A").unwrap().get(), 4);

        let foreign_only = concat!(
            r#"<workbook xmlns:x="urn:vendor"><sheets>"#,
            r#"<sheet name="A" x:id="rId9"/></sheets></workbook>"#,
        );
        let err = SheetDirectory::parse(foreign_only.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_unparsable_workbook() {
        let err = SheetDirectory::parse(b"<workbook><sheets></workbook>").unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));

        let err = SheetDirectory::parse(b"").unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_missing_workbook_part() {
        let data = zip_members(&[("xl/sharedStrings.xml", "<sst/>")]);
        let mut archive = ArchiveHandle::from_bytes(data).unwrap();
        let err = SheetDirectory::from_archive(&mut archive).unwrap_err();
        assert!(matches!(err, Error::MalformedWorkbook(_)));
    }

    #[test]
    fn test_parse_rel_id() {
        assert_eq!(parse_rel_id("rId1").map(SheetId::get), Some(1));
        assert_eq!(parse_rel_id("rId42").map(SheetId::get), Some(42));
        assert_eq!(parse_rel_id("rId0"), None);
        assert_eq!(parse_rel_id("rId"), None);
        assert_eq!(parse_rel_id("rId+3"), None);
    }

    proptest! {
        #[test]
        fn prop_every_listed_name_resolves_to_its_id(
            ids in proptest::collection::btree_set(1u32..500, 1..12),
            absent in "[a-z]{1,8}",
        ) {
            let sheets: Vec<(String, u32)> =
                ids.iter().map(|id| (format!("Sheet {}", id), *id)).collect();
            let refs: Vec<(&str, u32)> = sheets.iter().map(|(n, id)| (n.as_str(), *id)).collect();
            let dir = SheetDirectory::parse(workbook_xml(&refs).as_bytes()).unwrap();

            for (name, id) in &sheets {
                prop_assert_eq!(dir.resolve(name).unwrap().get(), *id);
            }
            prop_assert!(matches!(dir.resolve(&absent), Err(Error::SheetNotFound(_))));
        }
    }
}
