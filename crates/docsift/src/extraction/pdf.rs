//! PDF text extraction using lopdf.
//!
//! Pages are extracted in page-number order and joined with newlines. The final
//! text is trimmed. Any page that fails to extract fails the whole document.

use super::DocumentExtractor;
use crate::Result;
use crate::core::formats::DocumentFormat;
use lopdf::Document;
use std::path::Path;

/// Extractor for `.pdf` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract_path(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        extract_text(&bytes)
    }
}

/// Extract the text of every page from PDF bytes.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document.extract_text(&[*page_number])?;
        text.push_str(&page_text);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}
