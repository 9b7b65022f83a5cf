//! The closed set of operations and their argument parsing.

use crate::DocsiftError;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Tool name of [`Operation::Scan`].
pub const SCAN_DOCUMENTS: &str = "scan_documents";
/// Tool name of [`Operation::Search`].
pub const SEARCH_DOCUMENTS: &str = "search_documents";
/// Tool name of [`Operation::List`].
pub const LIST_DOCUMENTS: &str = "list_documents";
/// Tool name of [`Operation::Stats`].
pub const GET_DOCUMENT_STATS: &str = "get_document_stats";
/// Tool name of [`Operation::GetContent`].
pub const GET_DOCUMENT_CONTENT: &str = "get_document_content";

/// One request against the document index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Rebuild the cache from disk
    Scan,
    /// Substring search; `None` uses the configured default cap
    Search { query: String, max_results: Option<usize> },
    /// Metadata of every cached document
    List,
    /// Corpus statistics
    Stats,
    /// Full content of the first document with this base name
    GetContent { filename: String },
}

impl Operation {
    /// Every tool name, in listing order.
    pub const NAMES: [&'static str; 5] = [
        SCAN_DOCUMENTS,
        SEARCH_DOCUMENTS,
        LIST_DOCUMENTS,
        GET_DOCUMENT_STATS,
        GET_DOCUMENT_CONTENT,
    ];

    pub fn search(query: impl Into<String>, max_results: Option<usize>) -> Self {
        Operation::Search {
            query: query.into(),
            max_results,
        }
    }

    pub fn get_content(filename: impl Into<String>) -> Self {
        Operation::GetContent {
            filename: filename.into(),
        }
    }

    /// Tool name this operation is exposed under.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Scan => SCAN_DOCUMENTS,
            Operation::Search { .. } => SEARCH_DOCUMENTS,
            Operation::List => LIST_DOCUMENTS,
            Operation::Stats => GET_DOCUMENT_STATS,
            Operation::GetContent { .. } => GET_DOCUMENT_CONTENT,
        }
    }

    /// Parse a tool name and its optional argument object.
    ///
    /// Arguments not used by the operation are ignored.
    pub fn from_call(name: &str, arguments: Option<&Map<String, Value>>) -> Result<Self, OperationError> {
        match name {
            SCAN_DOCUMENTS => Ok(Operation::Scan),
            LIST_DOCUMENTS => Ok(Operation::List),
            GET_DOCUMENT_STATS => Ok(Operation::Stats),
            SEARCH_DOCUMENTS => {
                let query = required_string(arguments, "query")?;
                let max_results = optional_count(arguments, "max_results")?;
                Ok(Operation::Search { query, max_results })
            }
            GET_DOCUMENT_CONTENT => {
                let filename = required_string(arguments, "filename")?;
                Ok(Operation::GetContent { filename })
            }
            other => Err(OperationError::UnknownOperation(other.to_string())),
        }
    }
}

fn required_string(arguments: Option<&Map<String, Value>>, key: &'static str) -> Result<String, OperationError> {
    match arguments.and_then(|args| args.get(key)) {
        None | Some(Value::Null) => Err(OperationError::MissingArgument(key)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(OperationError::InvalidArgument(format!("{} parameter must be a string", key))),
    }
}

fn optional_count(arguments: Option<&Map<String, Value>>, key: &'static str) -> Result<Option<usize>, OperationError> {
    match arguments.and_then(|args| args.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| OperationError::InvalidArgument(format!("{} must be a non-negative integer", key))),
    }
}

/// Failure of a single operation, rendered as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("{0} parameter is required")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl OperationError {
    /// The structured error mapping returned to callers.
    pub fn to_value(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl From<DocsiftError> for OperationError {
    fn from(error: DocsiftError) -> Self {
        match error {
            DocsiftError::Validation { message, .. } => OperationError::InvalidArgument(message),
            other => OperationError::Internal(other.to_string()),
        }
    }
}
