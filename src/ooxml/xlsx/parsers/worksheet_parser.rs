//! Parser for Excel worksheet XML files.
//!
//! This module streams an individual worksheet part (sheet1.xml,
//! sheet2.xml, etc.) and produces the resolved text of every cell, row by
//! row in document order. Formulas, styles and number formats are ignored;
//! a formula cell contributes its cached `<v>` value.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::common::xml::{push_entity, push_text};
use crate::common::{Error, Result};
use crate::ooxml::opc::constants::sml;
use crate::ooxml::opc::phys_pkg::ArchiveHandle;
use crate::ooxml::xlsx::SharedStrings;
use crate::sheet::{ColumnPolicy, RawCell, SheetMatrix};

use super::workbook_parser::SheetId;

/// Last column of a worksheet (`XFD`); references past it are ignored for
/// positional placement.
const MAX_COLUMN: u32 = 16_384;

/// Parse the worksheet stream of `sheet_id` into a matrix of cell text.
///
/// # Errors
/// - [`Error::MalformedSheet`] if the container has no stream for the id
/// - [`Error::InvalidReference`] if a cell points past the shared strings
/// - [`Error::Xml`] if the stream is not well-formed
pub fn parse_sheet(
    archive: &mut ArchiveHandle,
    sheet_id: SheetId,
    strings: &SharedStrings,
    policy: ColumnPolicy,
) -> Result<SheetMatrix> {
    let member = sheet_id.part_name();
    let content = archive
        .read_member(&member)?
        .ok_or_else(|| Error::MalformedSheet {
            sheet_id: sheet_id.get(),
            member: member.clone(),
        })?;

    let matrix = parse_worksheet_xml(&content, strings, policy)?;
    tracing::debug!(member = %member, rows = matrix.len(), "parsed worksheet");
    Ok(matrix)
}

/// Parse worksheet XML content into a matrix of cell text.
pub fn parse_worksheet_xml(
    content: &[u8],
    strings: &SharedStrings,
    policy: ColumnPolicy,
) -> Result<SheetMatrix> {
    let mut matrix = SheetMatrix::new();
    let mut reader = Reader::from_reader(content);
    let mut buf = Vec::new();

    let mut row: Option<RowBuilder> = None;
    let mut cell: Option<CellBuilder> = None;
    let mut target = TextTarget::None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                sml::ROW => row = Some(RowBuilder::new(policy)),
                sml::CELL if row.is_some() => cell = Some(CellBuilder::from_element(e)?),
                sml::VALUE if cell.is_some() => {
                    if let Some(c) = cell.as_mut() {
                        c.value = Some(String::new());
                    }
                    target = TextTarget::Value;
                },
                sml::INLINE_STRING if cell.is_some() => target = TextTarget::InlineString,
                sml::SHARED_TEXT if target == TextTarget::InlineString => {
                    if let Some(c) = cell.as_mut() {
                        c.inline.get_or_insert_with(String::new);
                    }
                    target = TextTarget::InlineText;
                },
                _ => {},
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                sml::ROW => matrix.push_row(Vec::new()),
                sml::CELL => {
                    if let Some(r) = row.as_mut() {
                        let empty = CellBuilder::from_element(e)?;
                        r.place(empty.column, String::new());
                    }
                },
                sml::VALUE => {
                    if let Some(c) = cell.as_mut() {
                        c.value = Some(String::new());
                    }
                },
                _ => {},
            },
            Ok(Event::Text(ref e)) => {
                if let Some(out) = target.buffer(cell.as_mut()) {
                    push_text(out, e)?;
                }
            },
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(out) = target.buffer(cell.as_mut()) {
                    push_entity(out, e)?;
                }
            },
            Ok(Event::CData(ref e)) => {
                if let Some(out) = target.buffer(cell.as_mut()) {
                    out.push_str(std::str::from_utf8(e.as_ref())?);
                }
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                sml::ROW => {
                    if let Some(r) = row.take() {
                        matrix.push_row(r.finish());
                    }
                },
                sml::CELL => {
                    if let (Some(c), Some(r)) = (cell.take(), row.as_mut()) {
                        let column = c.column;
                        let text = c.into_raw()?.resolve(strings)?;
                        r.place(column, text);
                    }
                    target = TextTarget::None;
                },
                sml::VALUE if target == TextTarget::Value => target = TextTarget::None,
                sml::SHARED_TEXT if target == TextTarget::InlineText => {
                    target = TextTarget::InlineString;
                },
                sml::INLINE_STRING if target == TextTarget::InlineString => {
                    target = TextTarget::None;
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Worksheet parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(matrix)
}

/// Which buffer character data currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    InlineString,
    InlineText,
}

impl TextTarget {
    fn buffer(self, cell: Option<&mut CellBuilder>) -> Option<&mut String> {
        let cell = cell?;
        match self {
            TextTarget::Value => cell.value.as_mut(),
            TextTarget::InlineText => cell.inline.as_mut(),
            TextTarget::None | TextTarget::InlineString => None,
        }
    }
}

/// A `<c>` element being read.
#[derive(Debug, Default)]
struct CellBuilder {
    /// The `r` reference, kept for error messages
    reference: Option<String>,
    /// 1-based column from the reference
    column: Option<u32>,
    /// Whether `t="s"`
    shared: bool,
    /// Whether `t="inlineStr"`
    inline_string: bool,
    /// Text of `<v>`, if present
    value: Option<String>,
    /// Text of `<is><t>`, if present
    inline: Option<String>,
}

impl CellBuilder {
    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        let mut builder = Self::default();
        for attr in element.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                sml::ATTR_TYPE => {
                    let value = attr.value.as_ref();
                    builder.shared = value == sml::TYPE_SHARED_STRING;
                    builder.inline_string = value == sml::TYPE_INLINE_STRING;
                },
                sml::ATTR_REF => {
                    let reference = std::str::from_utf8(attr.value.as_ref())?;
                    builder.column = column_from_reference(reference);
                    builder.reference = Some(reference.to_string());
                },
                _ => {},
            }
        }
        Ok(builder)
    }

    fn into_raw(self) -> Result<RawCell> {
        if self.shared {
            // No <v> means no value content, so the cell is empty.
            let Some(index) = self.value else {
                return Ok(RawCell::Empty);
            };
            let location = self.reference.as_deref().unwrap_or("?");
            let trimmed = index.trim();
            return atoi_simd::parse::<usize, false, false>(trimmed.as_bytes())
                .map(RawCell::SharedString)
                .map_err(|_| {
                    Error::InvalidReferenceText(format!(
                        "cell {} has non-numeric shared string index '{}'",
                        location, trimmed
                    ))
                });
        }

        Ok(match (self.value, self.inline) {
            (Some(value), _) => RawCell::Literal(value),
            (None, Some(inline)) if self.inline_string => RawCell::Literal(inline),
            _ => RawCell::Empty,
        })
    }
}

/// Cells of the `<row>` being read.
#[derive(Debug)]
struct RowBuilder {
    policy: ColumnPolicy,
    cells: Vec<String>,
}

impl RowBuilder {
    fn new(policy: ColumnPolicy) -> Self {
        Self {
            policy,
            cells: Vec::new(),
        }
    }

    /// Place a cell's text according to the column policy.
    fn place(&mut self, column: Option<u32>, text: String) {
        let slot = match (self.policy, column) {
            (ColumnPolicy::Positional, Some(col)) => usize::try_from(col - 1).ok(),
            _ => None,
        };

        match slot {
            Some(slot) if slot < self.cells.len() => self.cells[slot] = text,
            Some(slot) => {
                self.cells.resize(slot, String::new());
                self.cells.push(text);
            },
            None => self.cells.push(text),
        }
    }

    fn finish(self) -> Vec<String> {
        self.cells
    }
}

/// Extract the 1-based column from a cell reference (`C7` -> 3).
///
/// Returns `None` for references without column letters or past `XFD`.
pub fn column_from_reference(reference: &str) -> Option<u32> {
    let bytes = reference.as_bytes();
    let letters = bytes
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .unwrap_or(bytes.len());
    if letters == 0 || letters > 3 {
        return None;
    }

    // A=1, B=2, ..., Z=26, AA=27, etc.
    let mut col_num = 0u32;
    for &byte in &bytes[..letters] {
        col_num = col_num * 26 + u32::from(byte.to_ascii_uppercase() - b'A' + 1);
    }

    (col_num <= MAX_COLUMN).then_some(col_num)
}
