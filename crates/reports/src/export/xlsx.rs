//! Minimal single-sheet Office Open XML workbook.
//!
//! Money cells are written as numbers with a currency number format so
//! the sheet displays the same text as the table, CSV and PDF while staying
//! summable in a spreadsheet. Every other cell is an inline string carrying
//! the display text.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::export::ExportError;
use crate::model::{CellValue, ColumnKind, ReportRow, ReportSpec, SummaryTotals};

const STYLE_HEADER: u8 = 1;
const STYLE_MONEY: u8 = 2;
const STYLE_SUMMARY_LABEL: u8 = 1;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

pub fn encode_xlsx(
    spec: &ReportSpec,
    rows: &[ReportRow],
    totals: Option<&SummaryTotals>,
    sheet_name: &str,
) -> Result<Vec<u8>, ExportError> {
    let sheet = sheet_xml(spec, rows, totals);
    let workbook = workbook_xml(&sanitize_sheet_name(sheet_name));
    let styles = styles_xml(&spec.format.currency);

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", &styles),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
        zip.write_all(body.as_bytes())
            .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ExportError::Spreadsheet(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    )
}

/// cellXfs: 0 default, 1 bold, 2 currency
fn styles_xml(currency: &str) -> String {
    let code = escape_xml(&format!("\"{}\"0.00", currency));
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><numFmts count="1"><numFmt numFmtId="164" formatCode="{code}"/></numFmts><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#
    )
}

fn sheet_xml(spec: &ReportSpec, rows: &[ReportRow], totals: Option<&SummaryTotals>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    let mut r = 1usize;

    let header: Vec<Cell> = spec
        .header_labels()
        .into_iter()
        .map(|label| Cell::Text(label, STYLE_HEADER))
        .collect();
    push_row(&mut xml, r, &header);

    let offset = spec.display_offset();
    for (index, row) in rows.iter().enumerate() {
        r += 1;
        let display = spec.display_row(index, row);
        let cells: Vec<Cell> = display
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let money = i
                    .checked_sub(offset)
                    .and_then(|c| spec.columns.get(c))
                    .filter(|col| col.kind == ColumnKind::Money)
                    .and_then(|col| row.get(&col.key))
                    .and_then(CellValue::as_number);
                match money {
                    Some(n) if n.is_finite() => Cell::Number(n, STYLE_MONEY),
                    _ => Cell::Text(text, 0),
                }
            })
            .collect();
        push_row(&mut xml, r, &cells);
    }

    if let Some(totals) = totals {
        // blank spacer row, then short label/value rows
        r += 1;
        for (label, value) in spec.summary_lines(totals) {
            r += 1;
            push_row(
                &mut xml,
                r,
                &[Cell::Text(label, STYLE_SUMMARY_LABEL), Cell::Text(value, 0)],
            );
        }
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

enum Cell {
    Text(String, u8),
    Number(f64, u8),
}

fn push_row(xml: &mut String, r: usize, cells: &[Cell]) {
    xml.push_str(&format!(r#"<row r="{}">"#, r));
    for (i, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_letters(i), r);
        match cell {
            Cell::Text(text, style) => xml.push_str(&format!(
                r#"<c r="{}" t="inlineStr" s="{}"><is><t xml:space="preserve">{}</t></is></c>"#,
                reference,
                style,
                escape_xml(text)
            )),
            Cell::Number(n, style) => xml.push_str(&format!(
                r#"<c r="{}" s="{}"><v>{}</v></c>"#,
                reference, style, n
            )),
        }
    }
    xml.push_str("</row>");
}

/// 0 -> A, 25 -> Z, 26 -> AA
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Excel sheet names: at most 31 chars, none of `[]:*?/\`
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { ' ' } else { c })
        .collect();
    let trimmed: String = cleaned.trim().chars().take(31).collect();
    if trimmed.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        trimmed
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::aggregate;
    use crate::model::ColumnSpec;
    use crate::normalize::normalize_rows;
    use serde_json::json;
    use std::io::Read;

    fn spec() -> ReportSpec {
        ReportSpec::new("Purchase Invoices", "purchase_invoices")
            .serial("Sr.No")
            .column(ColumnSpec::text("Supplier", "supplier"))
            .column(ColumnSpec::money("Amount", "amount"))
            .total("amount")
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        s
    }

    fn first_row_texts(sheet: &str) -> Vec<String> {
        let end = sheet.find("</row>").unwrap();
        sheet[..end]
            .split(r#"<t xml:space="preserve">"#)
            .skip(1)
            .map(|part| part.split("</t>").next().unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_workbook_parts_and_header_row() {
        let spec = spec();
        let rows = normalize_rows(
            &spec,
            &[
                json!({"supplier": "Alpha & Sons", "amount": 500.5}),
                json!({"supplier": "Beta", "amount": 300}),
            ],
        );
        let totals = aggregate(&spec, &rows);
        let bytes = encode_xlsx(&spec, &rows, Some(&totals), "Invoices").unwrap();

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(first_row_texts(&sheet), spec.header_labels());
        assert!(sheet.contains("Alpha &amp; Sons"));
        assert!(sheet.contains(r#"<c r="C2" s="2"><v>500.5</v></c>"#));
        assert!(sheet.contains("Total Amount"));
        assert!(sheet.contains("₹800.50"));

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Invoices""#));
        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains("&quot;₹&quot;0.00"));
    }

    #[test]
    fn test_summary_rows_are_short() {
        let spec = spec();
        let rows = normalize_rows(&spec, &[json!({"supplier": "Alpha", "amount": 1})]);
        let totals = aggregate(&spec, &rows);
        let sheet = sheet_xml(&spec, &rows, Some(&totals));
        // header, one data row, spacer, records, total
        assert!(sheet.contains(r#"<row r="4"><c r="A4""#));
        assert!(sheet.contains(r#"<row r="5"><c r="A5""#));
        assert!(!sheet.contains(r#"<row r="3">"#));
        assert!(!sheet.contains(r#"r="C4""#));
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Sales [POS] 2024/25"), "Sales  POS  2024 25");
        assert_eq!(sanitize_sheet_name("???"), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
    }
}
