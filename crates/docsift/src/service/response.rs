//! Result mappings returned by each operation.
//!
//! Field order follows the serialized output; `serde_json` is built with
//! `preserve_order` so `Value` keeps it too.

use crate::core::formats::DocumentFormat;
use crate::types::{CorpusStats, DocumentRecord, SearchMatch};
use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub status: &'static str,
    pub message: String,
    pub documents: Vec<ScannedDocument>,
}

/// Scan entry with a truncated content preview.
#[derive(Debug, Serialize)]
pub struct ScannedDocument {
    pub filename: String,
    pub path: String,
    pub language: String,
    pub file_type: DocumentFormat,
    pub size: u64,
    pub content_preview: String,
}

impl ScannedDocument {
    pub fn from_record(record: &DocumentRecord, preview_chars: usize) -> Self {
        Self {
            filename: record.filename.clone(),
            path: record.path.clone(),
            language: record.language.clone(),
            file_type: record.file_type,
            size: record.size,
            content_preview: record.content_preview(preview_chars),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: &'static str,
    pub query: String,
    pub results_count: usize,
    pub results: Vec<SearchMatch>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub status: &'static str,
    pub total_documents: usize,
    pub documents: Vec<ListedDocument>,
}

/// List entry carrying the content length instead of the content.
#[derive(Debug, Serialize)]
pub struct ListedDocument {
    pub filename: String,
    pub path: String,
    pub language: String,
    pub file_type: DocumentFormat,
    pub size: u64,
    pub content_length: usize,
}

impl From<&DocumentRecord> for ListedDocument {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            filename: record.filename.clone(),
            path: record.path.clone(),
            language: record.language.clone(),
            file_type: record.file_type,
            size: record.size,
            content_length: record.content_length(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: &'static str,
    pub stats: CorpusStats,
}

/// Result of a content lookup; a miss is a result, not an error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Found {
        status: &'static str,
        filename: String,
        path: String,
        language: String,
        file_type: DocumentFormat,
        size: u64,
        content: String,
    },
    NotFound {
        status: &'static str,
        message: String,
    },
}

impl ContentResponse {
    pub fn found(record: DocumentRecord) -> Self {
        ContentResponse::Found {
            status: STATUS_SUCCESS,
            filename: record.filename,
            path: record.path,
            language: record.language,
            file_type: record.file_type,
            size: record.size,
            content: record.content,
        }
    }

    pub fn not_found(filename: &str) -> Self {
        ContentResponse::NotFound {
            status: STATUS_ERROR,
            message: format!("Document '{}' not found", filename),
        }
    }
}
