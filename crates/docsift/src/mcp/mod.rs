//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the document index as MCP tools over stdio.
//!
//! # Tools
//!
//! - **scan_documents**: Rebuild the index from the documents directory
//! - **search_documents**: Case-insensitive substring search with context
//! - **list_documents**: Metadata of every indexed document
//! - **get_document_stats**: Corpus statistics
//! - **get_document_content**: Full text of one document by file name

mod server;

pub use server::start_mcp_server;

pub use server::{DocsiftMcp, GetDocumentContentParams, SearchDocumentsParams};
