//! Tool descriptors: name, description and JSON input schema per operation.

use super::operation::{GET_DOCUMENT_CONTENT, GET_DOCUMENT_STATS, LIST_DOCUMENTS, SCAN_DOCUMENTS, SEARCH_DOCUMENTS};
use serde::Serialize;
use serde_json::{Value, json};

/// Description of one callable tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Descriptors for all five tools, in listing order.
pub fn tool_descriptors(default_max_results: usize) -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: SCAN_DOCUMENTS,
            description: "Scan and index all documents in the documents directory",
            input_schema: empty_schema(),
        },
        ToolDescriptor {
            name: SEARCH_DOCUMENTS,
            description: "Search for text within the indexed documents",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Text to search for in documents"
                    },
                    "max_results": {
                        "type": "integer",
                        "minimum": 0,
                        "description": format!(
                            "Maximum number of results to return (default: {})",
                            default_max_results
                        ),
                        "default": default_max_results
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: LIST_DOCUMENTS,
            description: "List all processed documents with their metadata",
            input_schema: empty_schema(),
        },
        ToolDescriptor {
            name: GET_DOCUMENT_STATS,
            description: "Get statistics about the document collection",
            input_schema: empty_schema(),
        },
        ToolDescriptor {
            name: GET_DOCUMENT_CONTENT,
            description: "Get the full content of a specific document",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Name of the document file"
                    }
                },
                "required": ["filename"]
            }),
        },
    ]
}

fn empty_schema() -> Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}
