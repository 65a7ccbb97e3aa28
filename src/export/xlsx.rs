//! XLSX export.
//!
//! Writes a single-sheet workbook as a minimal OOXML package: no styles,
//! no shared strings, text stored inline. Columns come from the serialized
//! field names of the rows, so a [`LinkEntry`] produces `page` and `url`.

use std::io::{Cursor, Write};

use serde::Serialize;
use serde_json::Value;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ExportError;
use crate::models::LinkEntry;

/// Name of the only worksheet.
pub const SHEET_NAME: &str = "Links";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// Render links as an XLSX workbook with one sheet named `Links`.
pub fn to_xlsx(links: &[LinkEntry]) -> Result<Vec<u8>, ExportError> {
    let sheet = sheet_xml(links)?;
    let workbook = workbook_xml(SHEET_NAME);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
        ),
        escape_xml(sheet_name)
    )
}

/// Build the worksheet from serialized rows.
///
/// The header is every field name seen, in first-seen order. Numbers become
/// numeric cells, strings inline text, booleans boolean cells. Nulls and
/// missing fields leave the cell empty.
fn sheet_xml<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut records = Vec::with_capacity(rows.len());
    let mut columns: Vec<String> = Vec::new();

    for row in rows {
        let Value::Object(record) = serde_json::to_value(row)? else {
            continue;
        };
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        records.push(record);
    }

    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#
    ));

    if !columns.is_empty() {
        xml.push_str(r#"<row r="1">"#);
        for (col, name) in columns.iter().enumerate() {
            push_cell(&mut xml, col, 1, &Value::String(name.clone()));
        }
        xml.push_str("</row>");
    }

    for (i, record) in records.iter().enumerate() {
        let row = i + 2;
        xml.push_str(&format!(r#"<row r="{}">"#, row));
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = record.get(name) {
                push_cell(&mut xml, col, row, value);
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

fn push_cell(xml: &mut String, col: usize, row: usize, value: &Value) {
    let reference = format!("{}{}", column_name(col), row);
    match value {
        Value::Null => {}
        Value::Number(n) => {
            xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n));
        }
        Value::Bool(b) => {
            xml.push_str(&format!(
                r#"<c r="{}" t="b"><v>{}</v></c>"#,
                reference,
                u8::from(*b)
            ));
        }
        Value::String(s) => push_text_cell(xml, &reference, s),
        other => push_text_cell(xml, &reference, &other.to_string()),
    }
}

fn push_text_cell(xml: &mut String, reference: &str, text: &str) {
    xml.push_str(&format!(
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        reference,
        escape_xml(text)
    ));
}

/// Spreadsheet column letters for a 0-based index: A..Z, AA..
fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Escape XML markup, dropping control characters XML 1.0 cannot carry.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if (c as u32) < 0x20 => {}
            c => escaped.push(c),
        }
    }
    escaped
}
