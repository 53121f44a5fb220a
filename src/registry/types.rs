//! Wire types for the tool-call protocol.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named arguments passed to a tool, keyed by parameter name.
pub type ToolParams = Map<String, Value>;

/// A single named parameter within a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub value: Value,
}

/// One tool invocation: a tool name plus its parameters in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

/// Batch request body for `POST /tool`.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    pub tool_calls: Vec<ToolCall>,
}

/// Per-call result. Exactly one of `output` and `error` is populated;
/// callers must check `error` before reading `output`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponseItem {
    pub tool_name: String,
    pub output: Option<Value>,
    pub error: Option<String>,
}

impl ToolResponseItem {
    pub fn ok(tool_name: impl Into<String>, output: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            output: Some(output),
            error: None,
        }
    }

    pub fn err(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            output: None,
            error: Some(error.into()),
        }
    }
}

/// Batch response body: one item per call, same order as the request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse {
    pub responses: Vec<ToolResponseItem>,
}

/// Response body for `GET /tools/list`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolListResponse {
    pub tools: Vec<String>,
}
