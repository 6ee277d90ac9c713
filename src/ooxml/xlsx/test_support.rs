//! Builders for in-memory .xlsx fixtures used by the unit tests.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const SML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Zip the given `(member name, content)` pairs.
pub fn zip_members(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in members {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// workbook.xml listing `(name, relationship number)` pairs.
pub fn workbook_xml(sheets: &[(&str, u32)]) -> String {
    let entries: String = sheets
        .iter()
        .enumerate()
        .map(|(i, (name, rel))| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                i + 1,
                rel
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{SML_NS}" xmlns:r="{REL_NS}"><bookViews><workbookView activeTab="0"/></bookViews><sheets>{entries}</sheets></workbook>"#
    )
}

/// sharedStrings.xml with one `<si><t>` per value.
pub fn shared_strings_xml(values: &[&str]) -> String {
    let items: String = values
        .iter()
        .map(|v| format!("<si><t>{}</t></si>", escape(v)))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{SML_NS}" count="{n}" uniqueCount="{n}">{items}</sst>"#,
        n = values.len()
    )
}

/// Worksheet part wrapping the given `<row>` markup.
pub fn sheet_xml(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{SML_NS}" xmlns:r="{REL_NS}"><dimension ref="A1"/><sheetData>{rows}</sheetData></worksheet>"#
    )
}

/// Markup for a row of shared-string cells.
pub fn shared_row(row: u32, indices: &[usize]) -> String {
    let cells: String = indices
        .iter()
        .enumerate()
        .map(|(col, index)| {
            let letter = char::from(b'A' + u8::try_from(col).unwrap());
            format!(r#"<c r="{letter}{row}" t="s"><v>{index}</v></c>"#)
        })
        .collect();
    format!(r#"<row r="{row}">{cells}</row>"#)
}

/// Markup for a row of literal cells.
pub fn literal_row(row: u32, values: &[&str]) -> String {
    let cells: String = values
        .iter()
        .enumerate()
        .map(|(col, value)| {
            let letter = char::from(b'A' + u8::try_from(col).unwrap());
            format!(r#"<c r="{letter}{row}"><v>{}</v></c>"#, escape(value))
        })
        .collect();
    format!(r#"<row r="{row}">{cells}</row>"#)
}

/// A two-sheet workbook: "People" (shared strings with a header row) and
/// "Numbers" (literal values, no header), plus an "Orphan" entry whose
/// worksheet stream is missing.
pub fn sample_workbook() -> Vec<u8> {
    let workbook = workbook_xml(&[("People", 1), ("Numbers", 2), ("Orphan", 9)]);
    let strings = shared_strings_xml(&["Name", "City", "Ada", "London", "Linus", "Helsinki"]);
    let people = sheet_xml(
        &[shared_row(1, &[0, 1]), shared_row(2, &[2, 3]), shared_row(3, &[4, 5])].concat(),
    );
    let numbers = sheet_xml(&[literal_row(1, &["1", "2"]), literal_row(2, &["3", "4"])].concat());

    zip_members(&[
        ("[Content_Types].xml", "<Types/>"),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/sharedStrings.xml", strings.as_str()),
        ("xl/worksheets/sheet1.xml", people.as_str()),
        ("xl/worksheets/sheet2.xml", numbers.as_str()),
    ])
}

/// Write `data` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
