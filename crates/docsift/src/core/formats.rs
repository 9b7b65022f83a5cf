//! Supported document formats and extension-based detection.
//!
//! Format selection is purely by file extension, compared case-insensitively
//! against a fixed table. Content sniffing is not attempted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A document format the index knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Word Document")]
    Docx,
    #[serde(rename = "Excel Spreadsheet")]
    Xlsx,
    #[serde(rename = "Text File")]
    Text,
}

/// Extension table, lower-case with leading dot.
pub const SUPPORTED_EXTENSIONS: [(&str, DocumentFormat); 4] = [
    (".pdf", DocumentFormat::Pdf),
    (".docx", DocumentFormat::Docx),
    (".xlsx", DocumentFormat::Xlsx),
    (".txt", DocumentFormat::Text),
];

impl DocumentFormat {
    /// Human-readable label reported as `file_type`.
    pub fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "Word Document",
            DocumentFormat::Xlsx => "Excel Spreadsheet",
            DocumentFormat::Text => "Text File",
        }
    }

    /// Look up a format by extension. Accepts `pdf`, `.pdf`, `.PDF`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let normalized = extension.trim_start_matches('.').to_ascii_lowercase();

        SUPPORTED_EXTENSIONS
            .iter()
            .find(|(ext, _)| ext[1..] == normalized)
            .map(|(_, format)| *format)
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower-cased extension of `path` with a leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
