//! Format-specific text extraction.
//!
//! Each supported format has one extractor implementing [`DocumentExtractor`].
//! Extractors map a file path to flat text; layout and structure are not kept.
//! [`ExtractorSet`] holds one extractor per [`DocumentFormat`] and is what the
//! scanner dispatches through.
//!
//! # Example
//!
//! ```rust,no_run
//! use docsift::extraction::ExtractorSet;
//! use docsift::{DocumentFormat, IndexConfig};
//! use std::path::Path;
//!
//! # fn main() -> docsift::Result<()> {
//! let extractors = ExtractorSet::from_config(&IndexConfig::default());
//! let text = extractors.get(DocumentFormat::Pdf).extract_path(Path::new("report.pdf"))?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod docx;
pub mod excel;
pub mod pdf;
pub mod text;

use crate::Result;
use crate::core::config::IndexConfig;
use crate::core::formats::DocumentFormat;
use std::path::Path;

pub use docx::DocxExtractor;
pub use excel::ExcelExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

/// Separator placed between table cells and spreadsheet values.
pub const CELL_SEPARATOR: &str = " | ";

/// Extracts flat text from one document format.
pub trait DocumentExtractor: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    /// Format handled by this extractor.
    fn format(&self) -> DocumentFormat;

    /// Extract the text of the file at `path`.
    ///
    /// An `Ok` result may be empty; the caller decides what empty text means.
    fn extract_path(&self, path: &Path) -> Result<String>;
}

/// One extractor per supported format.
pub struct ExtractorSet {
    pdf: PdfExtractor,
    docx: DocxExtractor,
    excel: ExcelExtractor,
    text: PlainTextExtractor,
}

impl ExtractorSet {
    /// Build the extractor set, resolving the configured text encodings.
    pub fn from_config(config: &IndexConfig) -> Self {
        Self {
            pdf: PdfExtractor::new(),
            docx: DocxExtractor::new(),
            excel: ExcelExtractor::new(),
            text: PlainTextExtractor::from_labels(&config.encodings),
        }
    }

    /// The extractor registered for `format`.
    pub fn get(&self, format: DocumentFormat) -> &dyn DocumentExtractor {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::Xlsx => &self.excel,
            DocumentFormat::Text => &self.text,
        }
    }
}

impl Default for ExtractorSet {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}
