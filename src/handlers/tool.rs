use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::registry::{ToolListResponse, ToolParams, ToolRequest, ToolResponse, ToolResponseItem};
use crate::state::AppState;

/// POST /tool - Resolve a batch of tool calls.
///
/// Always returns one response item per call, in request order. Per-call
/// failures land in the item's `error` field; only a malformed envelope is a
/// transport-level failure.
pub async fn tool_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToolRequest>,
) -> Json<ToolResponse> {
    let batch_size = request.tool_calls.len();

    let responses = state.registry.dispatch(request.tool_calls).await;

    metrics::counter!("tool_calls_total").increment(batch_size as u64);
    metrics::histogram!("tool_batch_size").record(batch_size as f64);

    Json(ToolResponse { responses })
}

/// Single-call convenience body: parameters as a plain object.
#[derive(Debug, Deserialize)]
pub struct RawToolRequest {
    pub name: String,
    #[serde(default)]
    pub parameters: ToolParams,
}

/// POST /raw_tool - Single-call convenience path.
pub async fn raw_tool_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RawToolRequest>,
) -> Json<ToolResponseItem> {
    metrics::counter!("tool_calls_total").increment(1);

    Json(state.registry.invoke(&request.name, request.parameters).await)
}

/// GET /tools/list - Names of all registered tools.
pub async fn list_tools_handler(State(state): State<Arc<AppState>>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: state.registry.names(),
    })
}
