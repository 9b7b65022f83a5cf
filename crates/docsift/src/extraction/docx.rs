//! Word (`.docx`) text extraction using docx-lite.
//!
//! Paragraph text comes first, one paragraph per line. Table text is appended
//! after all paragraphs: cells joined with `" | "`, one table row per line.

use super::{CELL_SEPARATOR, DocumentExtractor};
use crate::core::formats::DocumentFormat;
use crate::{DocsiftError, Result};
use std::io::Cursor;
use std::path::Path;

/// Extractor for `.docx` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract_path(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        extract_text(&bytes)
    }
}

/// Extract paragraph and table text from DOCX bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let document = docx_lite::parse_document(Cursor::new(bytes))
        .map_err(|e| DocsiftError::parsing(format!("DOCX parsing failed: {}", e)))?;

    let mut text = String::new();

    for paragraph in &document.paragraphs {
        text.push_str(&paragraph.to_text());
        text.push('\n');
    }

    for table in &document.tables {
        append_table(&mut text, table);
    }

    Ok(text.trim().to_string())
}

/// Append one line per table row, cells joined with the cell separator.
///
/// docx-lite folds all runs of a cell into a single paragraph.
fn append_table(text: &mut String, table: &docx_lite::Table) {
    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                let cell_text: String = cell.paragraphs.iter().map(|para| para.to_text()).collect();
                cell_text.trim().to_string()
            })
            .collect();
        text.push_str(&cells.join(CELL_SEPARATOR));
        text.push('\n');
    }
}
