//! Operation dispatch over a shared [`DocumentIndex`].
//!
//! [`DocumentService`] is the boundary transports talk to. It takes an
//! [`Operation`] (or a tool name plus JSON arguments), runs it against the
//! index and returns the JSON result mapping. Argument problems and internal
//! faults come back as `{"error": "..."}` values; a panic inside an operation
//! is caught here and never reaches the transport.
//!
//! # Example
//!
//! ```rust,no_run
//! use docsift::service::{DocumentService, Operation};
//! use docsift::IndexConfig;
//!
//! # fn main() -> docsift::Result<()> {
//! let service = DocumentService::from_config(IndexConfig::default())?;
//! service.call("scan_documents", None);
//!
//! let result = service.execute(&Operation::search("invoice", Some(5)));
//! println!("{:?}", result);
//! # Ok(())
//! # }
//! ```

pub mod operation;
pub mod response;
pub mod tools;

pub use operation::{Operation, OperationError};
pub use tools::{ToolDescriptor, tool_descriptors};

use crate::Result;
use crate::core::config::IndexConfig;
use crate::core::pipeline::panic_message;
use crate::index::DocumentIndex;
use response::{
    ContentResponse, ListResponse, ListedDocument, STATUS_SUCCESS, ScanResponse, ScannedDocument, SearchResponse,
    StatsResponse,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Cloneable handle that executes operations against one index.
#[derive(Debug, Clone)]
pub struct DocumentService {
    index: Arc<DocumentIndex>,
}

impl DocumentService {
    pub fn new(index: Arc<DocumentIndex>) -> Self {
        Self { index }
    }

    /// Build an index from `config` and wrap it.
    pub fn from_config(config: IndexConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(DocumentIndex::new(config)?)))
    }

    pub fn index(&self) -> &Arc<DocumentIndex> {
        &self.index
    }

    /// Descriptors of the tools this service answers.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        tool_descriptors(self.index.config().search.max_results)
    }

    /// Parse and execute a tool call, always producing a result mapping.
    pub fn call(&self, name: &str, arguments: Option<&Map<String, Value>>) -> Value {
        tracing::debug!("Tool call: {}", name);

        match Operation::from_call(name, arguments).and_then(|operation| self.execute(&operation)) {
            Ok(value) => value,
            Err(error) => error.to_value(),
        }
    }

    /// Execute `operation`, containing panics at this boundary.
    pub fn execute(&self, operation: &Operation) -> std::result::Result<Value, OperationError> {
        let outcome = catch_unwind(AssertUnwindSafe(|| self.dispatch(operation)));

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(OperationError::Internal(panic_message(payload.as_ref()))),
        };

        if let Err(OperationError::Internal(message)) = &result {
            tracing::error!("Error in tool {}: {}", operation.name(), message);
        }
        result
    }

    fn dispatch(&self, operation: &Operation) -> std::result::Result<Value, OperationError> {
        match operation {
            Operation::Scan => {
                let documents = self.index.scan()?;
                let preview_chars = self.index.config().preview_chars;

                to_value(ScanResponse {
                    status: STATUS_SUCCESS,
                    message: format!("Scanned and processed {} documents", documents.len()),
                    documents: documents
                        .iter()
                        .map(|record| ScannedDocument::from_record(record, preview_chars))
                        .collect(),
                })
            }

            Operation::Search { query, max_results } => {
                let max_results = max_results.unwrap_or(self.index.config().search.max_results);
                let results = self.index.search(query, max_results)?;

                to_value(SearchResponse {
                    status: STATUS_SUCCESS,
                    query: query.clone(),
                    results_count: results.len(),
                    results,
                })
            }

            Operation::List => {
                let snapshot = self.index.snapshot();

                to_value(ListResponse {
                    status: STATUS_SUCCESS,
                    total_documents: snapshot.len(),
                    documents: snapshot.values().map(ListedDocument::from).collect(),
                })
            }

            Operation::Stats => to_value(StatsResponse {
                status: STATUS_SUCCESS,
                stats: self.index.stats(),
            }),

            Operation::GetContent { filename } => match self.index.find_by_filename(filename) {
                Some(record) => to_value(ContentResponse::found(record)),
                None => to_value(ContentResponse::not_found(filename)),
            },
        }
    }
}

fn to_value<T: Serialize>(response: T) -> std::result::Result<Value, OperationError> {
    serde_json::to_value(response).map_err(|e| OperationError::Internal(e.to_string()))
}
