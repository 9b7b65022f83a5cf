use crate::core::formats::DocumentFormat;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// ============================================================================

/// One successfully processed document.
///
/// Records are only created for files whose extractor produced non-empty text.
/// A record is built once per scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Canonical filesystem path, unique within the cache
    pub path: String,
    /// Base name used for user-facing lookup (not unique across subdirectories)
    pub filename: String,
    /// Extracted, flattened text
    pub content: String,
    /// ISO 639-1 code or `"unknown"`
    pub language: String,
    pub file_type: DocumentFormat,
    /// Size of the source file in bytes
    pub size: u64,
    /// Modification time of the source file, seconds since the Unix epoch
    pub last_modified: f64,
}

impl DocumentRecord {
    /// Number of characters in the extracted content.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }

    /// First `limit` characters of the content, with `"..."` appended when cut.
    pub fn content_preview(&self, limit: usize) -> String {
        match self.content.char_indices().nth(limit) {
            Some((cut, _)) => format!("{}...", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}

/// A single occurrence of a search query within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub filename: String,
    pub path: String,
    pub language: String,
    pub file_type: DocumentFormat,
    /// Context window around the match with the match wrapped in `**`
    pub context: String,
    /// Character offset of the match start within the document content
    pub position: usize,
    /// 1-based index of this occurrence within its document
    pub match_number: usize,
    /// Occurrences retained for this document (capped)
    pub total_matches: usize,
    pub size: u64,
}

/// Corpus-level aggregates.
///
/// An empty corpus serializes to `{"total_documents": 0}` only; every other
/// field is absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size_bytes: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size_mb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_size_kb: Option<f64>,

    /// Document count per language, in order of first appearance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<IndexMap<String, usize>>,

    /// Document count per file type label, in order of first appearance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_types: Option<IndexMap<String, usize>>,
}
