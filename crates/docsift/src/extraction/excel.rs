//! Spreadsheet (`.xlsx`) text extraction using calamine.
//!
//! Every sheet is emitted in workbook order as a `Sheet: <name>` marker line
//! followed by its rows. Cell values (cached formula results, not formulas) are
//! joined with `" | "`. Rows that serialize to whitespace only are skipped and a
//! blank line separates sheets.

use super::{CELL_SEPARATOR, DocumentExtractor};
use crate::core::formats::DocumentFormat;
use crate::{DocsiftError, Result};
use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Extractor for `.xlsx` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for ExcelExtractor {
    fn name(&self) -> &str {
        "excel-extractor"
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Xlsx
    }

    fn extract_path(&self, path: &Path) -> Result<String> {
        read_workbook_text(path)
    }
}

/// Read every sheet of the workbook at `path` as flat text.
pub fn read_workbook_text(path: &Path) -> Result<String> {
    let mut workbook: Xlsx<_> = match open_workbook(path) {
        Ok(wb) => wb,
        // Real IO error - bubble up unchanged
        Err(XlsxError::Io(io_err)) => return Err(io_err.into()),
        Err(e) => return Err(DocsiftError::parsing(format!("Failed to parse XLSX file: {}", e))),
    };

    let mut text = String::new();

    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| DocsiftError::parsing(format!("Failed to read sheet '{}': {}", name, e)))?;

        let _ = writeln!(text, "Sheet: {}", name);
        append_rows(&mut text, &range);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}

fn append_rows(text: &mut String, range: &Range<Data>) {
    let mut row_text = String::new();

    for row in range.rows() {
        row_text.clear();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                row_text.push_str(CELL_SEPARATOR);
            }
            format_cell_value_into(&mut row_text, cell);
        }

        if !row_text.trim().is_empty() {
            text.push_str(&row_text);
            text.push('\n');
        }
    }
}

#[inline]
fn format_cell_value_into(buffer: &mut String, data: &Data) {
    match data {
        Data::Empty => {}
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => buffer.push_str(s),
        Data::Float(f) => {
            // whole numbers are stored as floats; render them as integers
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                let _ = write!(buffer, "{}", *f as i64);
            } else {
                let _ = write!(buffer, "{}", f);
            }
        }
        Data::Int(i) => {
            let _ = write!(buffer, "{}", i);
        }
        Data::Bool(b) => buffer.push_str(if *b { "True" } else { "False" }),
        Data::DateTime(dt) => {
            if let Some(datetime) = dt.as_datetime() {
                let _ = write!(buffer, "{}", datetime.format("%Y-%m-%d %H:%M:%S"));
            } else {
                let _ = write!(buffer, "{}", dt.as_f64());
            }
        }
        Data::Error(e) => {
            let _ = write!(buffer, "{}", e);
        }
    }
}
