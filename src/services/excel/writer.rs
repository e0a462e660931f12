//! Minimal single-sheet XLSX writer.
//!
//! Text is written as inline strings so no shared-string table is needed.
//! Dates use the built-in `m/d/yy h:mm` number format (style 1) so readers
//! see them as dates again.

use super::utils::{column_letters, sanitize_xml_text};
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::error::AppError;
use crate::models::CellValue;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIP_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="22" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

const DATE_STYLE: &str = "1";

fn xml_error(err: impl std::fmt::Display) -> AppError {
    AppError::Export(format!("Failed to write XML: {}", err))
}

#[derive(Debug, Clone)]
pub struct XlsxWriter {
    sheet_name: String,
}

impl XlsxWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Writes `columns` as the header row followed by `rows`.
    pub fn write(&self, columns: &[String], rows: &[Vec<CellValue>]) -> Result<Bytes, AppError> {
        let start = std::time::Instant::now();
        let parts: [(&str, Vec<u8>); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
            ("_rels/.rels", ROOT_RELS.as_bytes().to_vec()),
            ("docProps/core.xml", core_properties_xml()?),
            ("xl/workbook.xml", self.workbook_xml()?),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes().to_vec()),
            ("xl/styles.xml", STYLES.as_bytes().to_vec()),
            ("xl/worksheets/sheet1.xml", sheet_xml(columns, rows)?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, contents) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&contents)
                .map_err(|e| AppError::Export(format!("Failed to write {}: {}", name, e)))?;
        }
        let cursor = zip.finish()?;
        let data = cursor.into_inner();

        tracing::debug!(
            "Wrote workbook with {} rows, {}KB in {:?}",
            rows.len(),
            data.len() / 1024,
            start.elapsed()
        );
        Ok(Bytes::from(data))
    }

    fn workbook_xml(&self) -> Result<Vec<u8>, AppError> {
        let mut writer = Writer::new(Vec::new());
        write_declaration(&mut writer)?;
        writer
            .write_event(Event::Start(BytesStart::new("workbook").with_attributes([
                ("xmlns", SPREADSHEET_NS),
                ("xmlns:r", RELATIONSHIP_NS),
            ])))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("sheets")))
            .map_err(xml_error)?;
        let name = sanitize_xml_text(&self.sheet_name);
        writer
            .write_event(Event::Empty(BytesStart::new("sheet").with_attributes([
                ("name", &*name),
                ("sheetId", "1"),
                ("r:id", "rId1"),
            ])))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("sheets")))
            .map_err(xml_error)?;
        writer
            .write_event(Event::End(BytesEnd::new("workbook")))
            .map_err(xml_error)?;
        Ok(writer.into_inner())
    }
}

fn write_declaration(writer: &mut Writer<Vec<u8>>) -> Result<(), AppError> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_error)
}

fn core_properties_xml() -> Result<Vec<u8>, AppError> {
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut writer = Writer::new(Vec::new());
    write_declaration(&mut writer)?;
    writer
        .write_event(Event::Start(BytesStart::new("cp:coreProperties").with_attributes([
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ])))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("dcterms:created").with_attributes([("xsi:type", "dcterms:W3CDTF")]),
        ))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&created)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("dcterms:created")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("cp:coreProperties")))
        .map_err(xml_error)?;
    Ok(writer.into_inner())
}

fn sheet_xml(columns: &[String], rows: &[Vec<CellValue>]) -> Result<Vec<u8>, AppError> {
    let mut writer = Writer::new(Vec::new());
    write_declaration(&mut writer)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("worksheet").with_attributes([("xmlns", SPREADSHEET_NS)]),
        ))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("sheetData")))
        .map_err(xml_error)?;

    let header: Vec<CellValue> = columns.iter().cloned().map(CellValue::String).collect();
    write_row(&mut writer, 1, &header)?;
    for (idx, row) in rows.iter().enumerate() {
        write_row(&mut writer, idx + 2, row)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("sheetData")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("worksheet")))
        .map_err(xml_error)?;
    Ok(writer.into_inner())
}

fn write_row(writer: &mut Writer<Vec<u8>>, row_number: usize, cells: &[CellValue]) -> Result<(), AppError> {
    let row_ref = row_number.to_string();
    writer
        .write_event(Event::Start(
            BytesStart::new("row").with_attributes([("r", row_ref.as_str())]),
        ))
        .map_err(xml_error)?;
    for (col_idx, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letters(col_idx), row_number);
        write_cell(writer, &reference, cell)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("row")))
        .map_err(xml_error)
}

fn write_cell(writer: &mut Writer<Vec<u8>>, reference: &str, cell: &CellValue) -> Result<(), AppError> {
    match cell {
        CellValue::Empty => Ok(()),
        CellValue::String(s) => write_inline_string(writer, reference, s),
        CellValue::Float(v) | CellValue::DateTime(v) if !v.is_finite() => {
            write_inline_string(writer, reference, &v.to_string())
        }
        CellValue::Float(v) => write_value(writer, reference, None, None, &v.to_string()),
        CellValue::Int(v) => write_value(writer, reference, None, None, &v.to_string()),
        CellValue::DateTime(v) => write_value(writer, reference, None, Some(DATE_STYLE), &v.to_string()),
        CellValue::Bool(b) => write_value(writer, reference, Some("b"), None, if *b { "1" } else { "0" }),
        CellValue::Error(e) => write_value(writer, reference, Some("e"), None, e),
    }
}

fn write_value(
    writer: &mut Writer<Vec<u8>>,
    reference: &str,
    cell_type: Option<&str>,
    style: Option<&str>,
    value: &str,
) -> Result<(), AppError> {
    let mut start = BytesStart::new("c").with_attributes([("r", reference)]);
    if let Some(cell_type) = cell_type {
        start.push_attribute(("t", cell_type));
    }
    if let Some(style) = style {
        start.push_attribute(("s", style));
    }
    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("v")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("v")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("c")))
        .map_err(xml_error)
}

fn write_inline_string(writer: &mut Writer<Vec<u8>>, reference: &str, text: &str) -> Result<(), AppError> {
    let text = sanitize_xml_text(text);
    writer
        .write_event(Event::Start(
            BytesStart::new("c").with_attributes([("r", reference), ("t", "inlineStr")]),
        ))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("is")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("t").with_attributes([("xml:space", "preserve")]),
        ))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("t")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("is")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("c")))
        .map_err(xml_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::excel::read_xlsx;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn written_workbook_reads_back() {
        let columns = vec!["text".to_string(), "score".to_string(), "ok".to_string()];
        let rows = vec![
            vec![s("I love <this> & that"), CellValue::Float(0.1 + 0.2), CellValue::Bool(true)],
            vec![CellValue::Empty, CellValue::Float(-1.0 / 3.0), CellValue::Bool(false)],
            vec![s("  padded  "), CellValue::Empty, CellValue::Empty],
        ];
        let data = XlsxWriter::new("Sheet1").write(&columns, &rows).unwrap();

        let table = read_xlsx(&data).unwrap();
        assert_eq!(table.columns(), columns.as_slice());
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[0][0], s("I love <this> & that"));
        assert_eq!(table.rows()[0][1], CellValue::Float(0.1 + 0.2));
        assert_eq!(table.rows()[0][2], CellValue::Bool(true));
        assert_eq!(table.rows()[1][0], CellValue::Empty);
        assert_eq!(table.rows()[1][1], CellValue::Float(-1.0 / 3.0));
        assert_eq!(table.rows()[2][0], s("  padded  "));
    }

    #[test]
    fn control_characters_do_not_break_the_sheet() {
        let columns = vec!["text".to_string()];
        let rows = vec![vec![s("odd\u{1}value")]];
        let data = XlsxWriter::new("Sheet1").write(&columns, &rows).unwrap();
        let table = read_xlsx(&data).unwrap();
        assert_eq!(table.rows()[0][0], s("oddvalue"));
    }

    #[test]
    fn header_only_sheet() {
        let columns = vec!["text".to_string()];
        let data = XlsxWriter::new("Comments").write(&columns, &[]).unwrap();
        let table = read_xlsx(&data).unwrap();
        assert_eq!(table.columns(), columns.as_slice());
        assert_eq!(table.row_count(), 0);
    }
}
