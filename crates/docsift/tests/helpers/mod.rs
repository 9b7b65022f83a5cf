//! Fixture builders for integration tests.
//!
//! Office documents are assembled as minimal OOXML packages with `zip` and PDFs
//! with `lopdf`, so no binary fixtures are checked in.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn write_package<N: AsRef<str>>(path: &Path, parts: &[(N, String)]) {
    let file = std::fs::File::create(path).expect("Failed to create package file");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, body) in parts {
        zip.start_file(name.as_ref(), options).expect("Failed to start zip entry");
        zip.write_all(body.as_bytes()).expect("Failed to write zip entry");
    }

    zip.finish().expect("Failed to finish zip archive");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn docx_paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, escape(text))
}

/// Write a `.docx` with one paragraph per entry.
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    write_docx_with_table(path, paragraphs, &[]);
}

/// Write a `.docx` with paragraphs followed by one table; an empty `rows` omits the table.
pub fn write_docx_with_table(path: &Path, paragraphs: &[&str], rows: &[&[&str]]) {
    let mut body: String = paragraphs.iter().map(|text| docx_paragraph(text)).collect();

    if !rows.is_empty() {
        body.push_str("<w:tbl>");
        for row in rows {
            body.push_str("<w:tr>");
            for cell in row.iter() {
                body.push_str("<w:tc>");
                body.push_str(&docx_paragraph(cell));
                body.push_str("</w:tc>");
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    let parts = [
        (
            "[Content_Types].xml",
            format!(
                r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
                XML_HEADER
            ),
        ),
        (
            "_rels/.rels",
            format!(
                r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
                XML_HEADER
            ),
        ),
        (
            "word/document.xml",
            format!(
                r#"{}<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
                XML_HEADER, body
            ),
        ),
    ];

    write_package(path, &parts);
}

/// One cell of a spreadsheet fixture.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

fn column_name(index: usize) -> String {
    let mut name = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name
}

fn sheet_xml(rows: &[Vec<Cell<'_>>]) -> String {
    let mut data = String::new();

    for (r, row) in rows.iter().enumerate() {
        data.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_name(c), r + 1);
            match cell {
                Cell::Text(text) => data.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    reference,
                    escape(text)
                )),
                Cell::Number(value) => data.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, value)),
                Cell::Empty => {}
            }
        }
        data.push_str("</row>");
    }

    format!(
        r#"{}<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        XML_HEADER, data
    )
}

/// Write an `.xlsx` with the given sheets in workbook order.
pub fn write_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<Cell<'_>>>)]) {
    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    let mut overrides = String::new();
    let mut parts: Vec<(String, String)> = Vec::new();

    for (i, (name, rows)) in sheets.iter().enumerate() {
        let id = i + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            id,
            id
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            id, id
        ));
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            id
        ));
        parts.push((format!("xl/worksheets/sheet{}.xml", id), sheet_xml(rows)));
    }

    parts.push((
        "[Content_Types].xml".to_string(),
        format!(
            r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
            XML_HEADER, overrides
        ),
    ));
    parts.push((
        "_rels/.rels".to_string(),
        format!(
            r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
            XML_HEADER
        ),
    ));
    parts.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"{}<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
            XML_HEADER, sheet_entries
        ),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(
            r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            XML_HEADER, relationships
        ),
    ));

    write_package(path, &parts);
}

/// Write a single-page PDF showing `text` in Courier.
pub fn write_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("Failed to encode PDF content"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path).expect("Failed to save PDF fixture");
}
