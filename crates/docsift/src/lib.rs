//! Docsift - document indexing and substring search
//!
//! Docsift walks a directory of PDF, Word, Excel and plain text files, extracts
//! flat text from each, detects the dominant language and keeps the results in
//! an in-memory cache that supports case-insensitive substring search with
//! highlighted context and corpus statistics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docsift::{DocumentIndex, IndexConfig};
//!
//! # fn main() -> docsift::Result<()> {
//! let index = DocumentIndex::new(IndexConfig::with_documents_dir("./documents"))?;
//! index.scan()?;
//!
//! for hit in index.search("quarterly report", 20)? {
//!     println!("{} @{}: {}", hit.filename, hit.position, hit.context);
//! }
//! println!("{:?}", index.stats());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Extraction** (`extraction`): one extractor per format, selected by extension
//! - **Language detection** (`language_detection`): whatlang with a length threshold
//! - **Index** (`index`): cache snapshot rebuilt by each scan
//! - **Search** (`search`) and **statistics** (`stats`) over the current snapshot
//! - **Service** (`service`): the five operations as a closed enum with JSON results
//! - **MCP** (`mcp`, feature `mcp`): stdio server exposing the operations as tools

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod index;
pub mod language_detection;
pub mod search;
pub mod service;
pub mod stats;
pub mod types;

#[cfg(feature = "mcp")]
pub mod mcp;

pub use error::{DocsiftError, Result};
pub use types::*;

pub use core::config::{CONFIG_FILE_NAME, IndexConfig, SearchConfig};
pub use core::formats::{DocumentFormat, SUPPORTED_EXTENSIONS};
pub use index::{DocumentCache, DocumentIndex};
pub use language_detection::{UNKNOWN_LANGUAGE, detect_language};
pub use service::{DocumentService, Operation, OperationError};
