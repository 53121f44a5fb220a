//! Tool registry and dispatch.
//!
//! The registry is an explicit object built during startup wiring and handed
//! to the HTTP layer through [`crate::state::AppState`]; there is no
//! process-wide registration. Dispatch resolves each call of a batch
//! independently: a failing tool yields a per-call error item and the batch
//! continues, so N calls always produce N responses in request order.

pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};

pub use types::{
    ToolCall, ToolListResponse, ToolParameter, ToolParams, ToolRequest, ToolResponse,
    ToolResponseItem,
};

/// A server-side function invocable by name with named parameters.
#[async_trait]
pub trait Tool: Send + Sync {
    async fn invoke(&self, params: ToolParams) -> Result<Value>;
}

/// Name-to-tool mapping consulted by the dispatcher.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `name` with a tool. Re-registration silently overwrites the
    /// previous entry (last writer wins).
    pub fn register(&mut self, name: impl Into<String>, tool: Arc<dyn Tool>) {
        let name = name.into();
        tracing::info!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    /// Registered tool names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Invoke a single tool by name, converting any failure into a per-call
    /// error item. Never returns a transport-level failure.
    pub async fn invoke(&self, name: &str, params: ToolParams) -> ToolResponseItem {
        let Some(tool) = self.tools.get(name) else {
            return ToolResponseItem::err(name, AppError::ToolNotFound(name.to_string()).to_string());
        };

        match tool.invoke(params).await {
            Ok(output) => ToolResponseItem::ok(name, output),
            Err(e) => {
                tracing::error!(tool = name, error = %e, "Tool execution failed");
                ToolResponseItem::err(name, e.to_string())
            }
        }
    }

    /// Resolve a batch of calls in order. Calls are processed sequentially;
    /// result order matches call order.
    pub async fn dispatch(&self, calls: Vec<ToolCall>) -> Vec<ToolResponseItem> {
        let mut responses = Vec::with_capacity(calls.len());

        for call in calls {
            // Fold the parameter list into keyword-style arguments. A
            // duplicated parameter name keeps the later value.
            let params: ToolParams = call
                .parameters
                .into_iter()
                .map(|p| (p.name, p.value))
                .collect();
            responses.push(self.invoke(&call.name, params).await);
        }

        responses
    }
}

/// Deserialize keyword-style arguments into a tool's argument struct.
pub fn parse_args<T: serde::de::DeserializeOwned>(params: ToolParams) -> Result<T> {
    serde_json::from_value(Value::Object(params)).map_err(|e| AppError::InvalidArgument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn invoke(&self, params: ToolParams) -> Result<Value> {
            Ok(Value::Object(params))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        async fn invoke(&self, _params: ToolParams) -> Result<Value> {
            Err(AppError::ExecutionError("boom".to_string()))
        }
    }

    struct ConstTool(Value);

    #[async_trait]
    impl Tool for ConstTool {
        async fn invoke(&self, _params: ToolParams) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    fn call(name: &str, params: &[(&str, Value)]) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            parameters: params
                .iter()
                .map(|(n, v)| ToolParameter {
                    name: n.to_string(),
                    value: v.clone(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_produces_error_item() {
        let registry = ToolRegistry::new();
        let responses = registry.dispatch(vec![call("missing", &[])]).await;

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].tool_name, "missing");
        assert!(responses[0].output.is_none());
        assert_eq!(responses[0].error.as_deref(), Some("Tool 'missing' not found"));
    }

    #[tokio::test]
    async fn test_failing_tool_does_not_abort_batch() {
        let mut registry = ToolRegistry::new();
        registry.register("echo", Arc::new(EchoTool));
        registry.register("fail", Arc::new(FailingTool));

        let responses = registry
            .dispatch(vec![
                call("echo", &[("a", json!(1))]),
                call("fail", &[]),
                call("echo", &[("b", json!(2))]),
            ])
            .await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].output, Some(json!({"a": 1})));
        assert!(responses[0].error.is_none());
        assert_eq!(responses[1].error.as_deref(), Some("boom"));
        assert!(responses[1].output.is_none());
        assert_eq!(responses[2].output, Some(json!({"b": 2})));
    }

    #[tokio::test]
    async fn test_reregistration_last_writer_wins() {
        let mut registry = ToolRegistry::new();
        registry.register("t", Arc::new(ConstTool(json!("first"))));
        registry.register("t", Arc::new(ConstTool(json!("second"))));

        let item = registry.invoke("t", ToolParams::new()).await;
        assert_eq!(item.output, Some(json!("second")));
        assert_eq!(registry.names(), vec!["t"]);
    }

    #[tokio::test]
    async fn test_duplicate_parameter_keeps_later_value() {
        let mut registry = ToolRegistry::new();
        registry.register("echo", Arc::new(EchoTool));

        let responses = registry
            .dispatch(vec![call("echo", &[("k", json!("old")), ("k", json!("new"))])])
            .await;

        assert_eq!(responses[0].output, Some(json!({"k": "new"})));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register("zeta", Arc::new(EchoTool));
        registry.register("alpha", Arc::new(EchoTool));

        assert_eq!(registry.names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_parse_args_rejects_wrong_type() {
        #[derive(serde::Deserialize)]
        struct Args {
            #[allow(dead_code)]
            url: String,
        }

        let mut params = ToolParams::new();
        params.insert("url".to_string(), json!(42));

        let result: Result<Args> = parse_args(params);
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }
}
