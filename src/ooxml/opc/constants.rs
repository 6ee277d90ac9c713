/// Constant values related to the package layout of an .xlsx file.
///
/// Member names are ZIP entry names, so they carry no leading slash.

/// Names of the members a spreadsheet conversion reads
pub mod part_name {
    pub const WORKBOOK: &str = "xl/workbook.xml";
    pub const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
    pub const WORKSHEET_DIR: &str = "xl/worksheets/";

    /// Member name of the worksheet stream for a sheet id.
    #[inline]
    pub fn worksheet(sheet_id: u32) -> String {
        format!("{}sheet{}.xml", WORKSHEET_DIR, sheet_id)
    }
}

/// Namespace URIs
pub mod namespace {
    /// Relationships namespace of transitional documents
    pub const RELATIONSHIPS: &[u8] =
        b"http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Relationships namespace of strict documents
    pub const RELATIONSHIPS_STRICT: &[u8] =
        b"http://purl.oclc.org/ooxml/officeDocument/relationships";

    /// Whether `uri` names the relationships namespace.
    #[inline]
    pub fn is_relationships(uri: &[u8]) -> bool {
        uri == RELATIONSHIPS || uri == RELATIONSHIPS_STRICT
    }
}

/// Element and attribute names of SpreadsheetML used by the parsers
pub mod sml {
    pub const SHEET: &[u8] = b"sheet";
    pub const SHARED_TEXT: &[u8] = b"t";
    pub const ROW: &[u8] = b"row";
    pub const CELL: &[u8] = b"c";
    pub const VALUE: &[u8] = b"v";
    pub const INLINE_STRING: &[u8] = b"is";

    pub const ATTR_NAME: &[u8] = b"name";
    /// Local name of the relationship-namespaced `r:id` attribute
    pub const ATTR_REL_ID: &[u8] = b"id";
    pub const ATTR_TYPE: &[u8] = b"t";
    pub const ATTR_REF: &[u8] = b"r";

    pub const TYPE_SHARED_STRING: &[u8] = b"s";
    pub const TYPE_INLINE_STRING: &[u8] = b"inlineStr";
    pub const REL_ID_PREFIX: &str = "rId";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheet_part_name() {
        assert_eq!(part_name::worksheet(1), "xl/worksheets/sheet1.xml");
        assert_eq!(part_name::worksheet(12), "xl/worksheets/sheet12.xml");
    }

    #[test]
    fn test_relationships_namespace() {
        assert!(namespace::is_relationships(namespace::RELATIONSHIPS));
        assert!(namespace::is_relationships(namespace::RELATIONSHIPS_STRICT));
        assert!(!namespace::is_relationships(b"urn:other"));
    }
}
