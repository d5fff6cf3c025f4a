use serde_json::{json, Value};

use trellis_core::config::defaults::{DEFAULT_EXPAND_GRAPH, DEFAULT_MAX_RESULT_LIMIT, DEFAULT_RESULT_LIMIT};
use trellis_core::constants::TOOL_NAME;

use crate::conversions::request::{FIELD_EXPAND_GRAPH, FIELD_LIMIT, FIELD_QUERY};

const DESCRIPTION: &str = "Semantic search over text fragments. Each match is returned with \
its owning document, the document's author, sibling fragments from the same document, and \
other documents by the same author.";

/// Tool name, description, and JSON input schema.
pub fn descriptor() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": DESCRIPTION,
        "inputSchema": {
            "type": "object",
            "properties": {
                (FIELD_QUERY): {
                    "type": "string",
                    "description": "Natural-language query text."
                },
                (FIELD_LIMIT): {
                    "type": "integer",
                    "minimum": 1,
                    "default": DEFAULT_RESULT_LIMIT,
                    "description": format!(
                        "Maximum results. Values above the server maximum (default {DEFAULT_MAX_RESULT_LIMIT}) are clamped."
                    )
                },
                (FIELD_EXPAND_GRAPH): {
                    "type": "boolean",
                    "default": DEFAULT_EXPAND_GRAPH,
                    "description": "Attach document, author, and related context to each result."
                }
            },
            "required": [FIELD_QUERY]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_the_tool_and_requires_query() {
        let d = descriptor();
        assert_eq!(d["name"], "graph_context_search");
        assert_eq!(d["inputSchema"]["required"], json!(["query"]));
        assert_eq!(d["inputSchema"]["properties"]["limit"]["default"], 5);
        assert_eq!(d["inputSchema"]["properties"]["expandGraph"]["type"], "boolean");
    }
}
